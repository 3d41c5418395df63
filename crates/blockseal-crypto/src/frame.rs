//! Length-prefixed, zero-padded framing of the AEAD plaintext
//!
//! Padding rounds the sealed size up to a coarse granularity so the stored
//! block reveals only an approximate file size. The explicit length prefix
//! lets payloads that end in zero bytes survive unpadding.

use crate::error::{CodecError, CodecResult};
use crate::FRAME_HEADER_SIZE;

/// Size of the frame for a payload of `payload_len` bytes: the smallest
/// multiple of `block_size` that is at least `payload_len + 4`.
pub fn framed_len(payload_len: usize, block_size: usize) -> CodecResult<usize> {
    if block_size == 0 {
        return Err(CodecError::InvalidBlockSize(block_size));
    }
    let needed = payload_len
        .checked_add(FRAME_HEADER_SIZE)
        .ok_or(CodecError::PayloadTooLarge(payload_len))?;
    needed
        .div_ceil(block_size)
        .checked_mul(block_size)
        .ok_or(CodecError::PayloadTooLarge(payload_len))
}

/// Frame `payload`: `[u32 BE length][payload][zero padding]`.
pub fn frame(payload: &[u8], block_size: usize) -> CodecResult<Vec<u8>> {
    let declared =
        u32::try_from(payload.len()).map_err(|_| CodecError::PayloadTooLarge(payload.len()))?;
    let size = framed_len(payload.len(), block_size)?;

    let mut padded = vec![0u8; size];
    padded[..FRAME_HEADER_SIZE].copy_from_slice(&declared.to_be_bytes());
    padded[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + payload.len()].copy_from_slice(payload);
    Ok(padded)
}

/// Strip the frame and return the payload it declares.
///
/// Bytes after the declared payload are discarded without being checked.
pub fn unframe(padded: &[u8]) -> CodecResult<&[u8]> {
    let Some((header, body)) = padded.split_first_chunk::<FRAME_HEADER_SIZE>() else {
        return Err(CodecError::TruncatedFrame(padded.len()));
    };
    let declared = u32::from_be_bytes(*header);
    let len = declared as usize;
    if len > body.len() {
        return Err(CodecError::InvalidFrameLength {
            declared,
            available: body.len(),
        });
    }
    Ok(&body[..len])
}
