//! blockseal-storage: put/get of stored blocks against a content-addressed backend
//!
//! The codec never talks to storage; callers hand a fully formed block to a
//! [`BlockStore`] and get back the address the backend assigned.

pub mod backend;
pub mod cas;
pub mod error;
pub mod health;
pub mod ipfs;
pub mod operator;
pub mod pipeline;
pub mod store;

pub use backend::build_block_store;
pub use cas::OpendalBlockStore;
pub use error::{PipelineError, StorageError, StorageResult};
pub use health::check_health;
pub use ipfs::IpfsBlockStore;
pub use operator::{build_fs_operator, build_memory_operator, build_s3_operator, S3Credentials};
pub use pipeline::{fetch_file, store_file, StoredFile};
pub use store::BlockStore;
