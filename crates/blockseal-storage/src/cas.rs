//! Content-addressed block store on top of an OpenDAL operator
//!
//! Blocks live at `{prefix}/blocks/{blake3_hex}`; the address handed back to
//! the caller is the 64-char hex digest. Writing the same block twice is a
//! no-op, and reads are re-hashed before being returned.

use async_trait::async_trait;
use opendal::{ErrorKind, Operator};
use tracing::debug;

use blockseal_core::Address;

use crate::error::{StorageError, StorageResult};
use crate::health;
use crate::store::BlockStore;

pub struct OpendalBlockStore {
    op: Operator,
    prefix: String,
}

impl OpendalBlockStore {
    pub fn new(op: Operator, prefix: &str) -> Self {
        Self {
            op,
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.op
    }

    /// Object key of the block with digest `hex`
    pub fn block_key(&self, hex: &str) -> String {
        if self.prefix.is_empty() {
            format!("blocks/{hex}")
        } else {
            format!("{}/blocks/{hex}", self.prefix)
        }
    }

    fn parse_address(address: &Address) -> StorageResult<blake3::Hash> {
        blake3::Hash::from_hex(address.as_str())
            .map_err(|e| StorageError::InvalidAddress(format!("{address}: {e}")))
    }
}

#[async_trait]
impl BlockStore for OpendalBlockStore {
    async fn put(&self, block: &[u8]) -> StorageResult<Address> {
        let hex = blake3::hash(block).to_hex().to_string();
        let key = self.block_key(&hex);

        if self.op.exists(&key).await? {
            debug!(address = %hex, "dedup: block already stored");
        } else {
            self.op.write(&key, block.to_vec()).await?;
            debug!(address = %hex, bytes = block.len(), "stored block");
        }
        Ok(Address::new(hex))
    }

    async fn get(&self, address: &Address) -> StorageResult<Vec<u8>> {
        let expected = Self::parse_address(address)?;
        let key = self.block_key(&expected.to_hex());

        let data = match self.op.read(&key).await {
            Ok(buf) => buf.to_vec(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(address.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let actual = blake3::hash(&data);
        if actual != expected {
            return Err(StorageError::HashMismatch {
                expected: expected.to_hex().to_string(),
                actual: actual.to_hex().to_string(),
            });
        }
        debug!(address = %address, bytes = data.len(), "fetched block");
        Ok(data)
    }

    async fn check_health(&self) -> StorageResult<()> {
        health::check_health(&self.op).await
    }

    fn describe(&self) -> String {
        let info = self.op.info();
        format!(
            "{} (root: {}, prefix: {})",
            info.scheme(),
            info.root(),
            if self.prefix.is_empty() { "(none)" } else { &self.prefix }
        )
    }
}
