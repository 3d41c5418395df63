//! File ⇄ (address, secret) round trips: the codec composed with a store
//!
//! `store_file` only calls `put` once the block is fully formed, and
//! `fetch_file` returns nothing unless the whole decode succeeds, so a failure
//! at any step leaves neither storage nor the caller with partial data.

use blockseal_core::Address;
use blockseal_crypto::{decode_block, decode_key, encode_block, encode_key};
use tracing::info;

use crate::error::PipelineError;
use crate::store::BlockStore;

/// The two-part credential needed to recover a stored file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub address: Address,
    /// Base-58 key string
    pub secret: String,
}

/// Encrypt `raw` under a fresh key and store the resulting block.
pub async fn store_file(
    store: &dyn BlockStore,
    raw: &[u8],
    block_size: usize,
) -> Result<StoredFile, PipelineError> {
    let encoded = encode_block(raw, block_size)?;
    let address = store.put(&encoded.block).await?;
    info!(address = %address, file_bytes = raw.len(), block_bytes = encoded.block.len(), "file stored");

    Ok(StoredFile {
        address,
        secret: encode_key(&encoded.key),
    })
}

/// Fetch the block at `address` and decrypt it with the base-58 `secret`.
///
/// The secret is parsed before any request is made.
pub async fn fetch_file(
    store: &dyn BlockStore,
    address: &Address,
    secret: &str,
) -> Result<Vec<u8>, PipelineError> {
    let key = decode_key(secret)?;
    let block = store.get(address).await?;
    let raw = decode_block(&block, &key)?;
    info!(address = %address, file_bytes = raw.len(), "file fetched");
    Ok(raw)
}
