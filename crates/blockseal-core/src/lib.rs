pub mod config;
pub mod error;
pub mod types;

pub use error::{BlocksealError, BlocksealResult};
pub use types::{Address, BackendKind};
