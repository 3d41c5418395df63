use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("random source unavailable: {0}")]
    Entropy(String),

    #[error("malformed ciphertext: {len} bytes (minimum {min})")]
    MalformedCiphertext { len: usize, min: usize },

    #[error("decryption failed: wrong key, corrupted data, or tampering")]
    AuthenticationFailure,

    #[error("truncated frame: {0} bytes (minimum 4)")]
    TruncatedFrame(usize),

    #[error("invalid frame length: header declares {declared} bytes, {available} available")]
    InvalidFrameLength { declared: u32, available: usize },

    #[error("payload too large to frame: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),

    #[error("unsupported node type: {0} (must be file or raw)")]
    UnsupportedNodeType(String),

    #[error("malformed node: {0}")]
    MalformedNode(#[from] blockseal_dag::DagError),

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),
}
