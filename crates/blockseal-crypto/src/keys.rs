//! Secret key type and generation

use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{CodecError, CodecResult};
use crate::KEY_SIZE;

/// A 256-bit block encryption key. Zeroized on drop.
///
/// The caller owns the key once it is returned; nothing in this crate
/// persists it.
#[derive(Clone)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate a random 256-bit key from the OS random source.
///
/// A failing random source is reported as `CodecError::Entropy`; it is never
/// retried.
pub fn generate_key() -> CodecResult<SecretKey> {
    let mut bytes = [0u8; KEY_SIZE];
    fill_random(&mut bytes)?;
    Ok(SecretKey::from_bytes(bytes))
}

/// Fill `buf` from the OS random source.
pub(crate) fn fill_random(buf: &mut [u8]) -> CodecResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CodecError::Entropy(e.to_string()))
}
