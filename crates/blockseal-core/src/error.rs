use thiserror::Error;

pub type BlocksealResult<T> = Result<T, BlocksealError>;

#[derive(Debug, Error)]
pub enum BlocksealError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
