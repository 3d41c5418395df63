//! XSalsa20-Poly1305 sealing with a random, prepended nonce
//!
//! Sealed format (binary), NaCl `secretbox` output with the nonce in front:
//! ```text
//! [24 bytes: random nonce][N + 16 bytes: secretbox(plaintext)]
//! ```
//!
//! No associated data is bound; the frame length prefix is inside the
//! authenticated plaintext.

use crypto_secretbox::{
    aead::{Aead, KeyInit},
    Nonce, XSalsa20Poly1305,
};

use crate::error::{CodecError, CodecResult};
use crate::keys::{fill_random, SecretKey};
use crate::{NONCE_SIZE, TAG_SIZE};

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// Returns: `[24-byte nonce][ciphertext + 16-byte tag]`
pub fn seal(plaintext: &[u8], key: &SecretKey) -> CodecResult<Vec<u8>> {
    let cipher = XSalsa20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    fill_random(&mut nonce_bytes)?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    // Fails only when the plaintext exceeds the cipher's length limit
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CodecError::PayloadTooLarge(plaintext.len()))?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);
    Ok(result)
}

/// Decrypt the output of [`seal`].
///
/// Fails with `MalformedCiphertext` when the input cannot even hold a nonce
/// and a tag, and with `AuthenticationFailure` when the tag does not verify.
/// No plaintext is returned unless authentication succeeds.
pub fn open(sealed: &[u8], key: &SecretKey) -> CodecResult<Vec<u8>> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CodecError::MalformedCiphertext {
            len: sealed.len(),
            min: NONCE_SIZE + TAG_SIZE,
        });
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);
    let cipher = XSalsa20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CodecError::AuthenticationFailure)
}
