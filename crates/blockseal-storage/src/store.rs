//! Storage trait definitions

use async_trait::async_trait;
use blockseal_core::Address;

use crate::error::StorageResult;

/// Content-addressed block storage
///
/// Single-shot request/response: no retries, caching or partial reads.
/// Callers wrap calls in their own timeout if they need one.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Store a block and return the address the backend assigned to it
    async fn put(&self, block: &[u8]) -> StorageResult<Address>;

    /// Retrieve a block by address
    ///
    /// Returns `StorageError::NotFound` if no block is stored there.
    async fn get(&self, address: &Address) -> StorageResult<Vec<u8>>;

    /// Verify the backend is reachable
    async fn check_health(&self) -> StorageResult<()>;

    /// Short description of the backend for status output
    fn describe(&self) -> String;
}
