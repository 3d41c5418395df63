//! Human-transcribable key strings (base-58, Bitcoin alphabet)
//!
//! No checksum and no version byte: the string is exactly the 32 key bytes.

use zeroize::Zeroize;

use crate::error::{CodecError, CodecResult};
use crate::keys::SecretKey;
use crate::KEY_SIZE;

/// Encode a key as a base-58 string.
pub fn encode_key(key: &SecretKey) -> String {
    bs58::encode(key.as_bytes()).into_string()
}

/// Decode a base-58 key string.
///
/// Surrounding whitespace is ignored. Anything that does not decode to
/// exactly 32 bytes is rejected; short or long keys are never padded or
/// truncated.
pub fn decode_key(encoded: &str) -> CodecResult<SecretKey> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(CodecError::InvalidKeyEncoding("empty key string".into()));
    }

    let mut bytes = bs58::decode(trimmed)
        .into_vec()
        .map_err(|e| CodecError::InvalidKeyEncoding(e.to_string()))?;

    if bytes.len() != KEY_SIZE {
        let len = bytes.len();
        bytes.zeroize();
        return Err(CodecError::InvalidKeyEncoding(format!(
            "decoded key is {len} bytes (expected {KEY_SIZE})"
        )));
    }

    let mut key_bytes = [0u8; KEY_SIZE];
    key_bytes.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(SecretKey::from_bytes(key_bytes))
}
