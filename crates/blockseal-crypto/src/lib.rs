//! blockseal-crypto: the encrypted-block codec
//!
//! Architecture: Pad-then-Encrypt with XSalsa20-Poly1305 (NaCl secretbox)
//!
//! Pipeline:
//! ```text
//! encode: file → unixfs File node → dag-pb → frame + pad → seal → dag-pb → stored block
//! decode: stored block → dag-pb → open → unframe → dag-pb → unixfs (File|Raw) → file
//! ```
//!
//! Frame layout (plaintext of the AEAD):
//! ```text
//! [4 bytes: payload length, u32 BE][payload][zero padding to a multiple of block_size]
//! ```
//!
//! Sealed layout: `[24 bytes: random nonce][secretbox(frame)]`. The tag covers
//! the whole frame, padding included.

pub mod cipher;
pub mod codec;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod keys;

pub use cipher::{open, seal};
pub use codec::{decode_block, encode_block, encode_block_with_key, EncodedBlock};
pub use encoding::{decode_key, encode_key};
pub use error::{CodecError, CodecResult};
pub use frame::{frame, framed_len, unframe};
pub use keys::{generate_key, SecretKey};

/// Size of a secret key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an XSalsa20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;

/// Size of the big-endian length prefix of a frame
pub const FRAME_HEADER_SIZE: usize = 4;

/// Default padding granularity of a frame
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
