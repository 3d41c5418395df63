//! Backend selection from config

use blockseal_core::config::{expand_tilde, StorageConfig};
use blockseal_core::BackendKind;

use crate::cas::OpendalBlockStore;
use crate::error::{StorageError, StorageResult};
use crate::ipfs::IpfsBlockStore;
use crate::operator::{build_fs_operator, build_memory_operator, build_s3_operator, S3Credentials};
use crate::store::BlockStore;

/// Build the block store selected by `cfg.backend`.
///
/// `credentials` is only consulted for the S3 backend.
pub fn build_block_store(
    cfg: &StorageConfig,
    credentials: Option<&S3Credentials>,
) -> StorageResult<Box<dyn BlockStore>> {
    let store: Box<dyn BlockStore> = match cfg.backend {
        BackendKind::Ipfs => Box::new(IpfsBlockStore::new(&cfg.ipfs_api)),
        BackendKind::S3 => {
            let creds = credentials.ok_or_else(|| {
                StorageError::Config(
                    "S3 credentials not set: export AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"
                        .into(),
                )
            })?;
            Box::new(OpendalBlockStore::new(
                build_s3_operator(cfg, creds)?,
                &cfg.prefix,
            ))
        }
        BackendKind::Fs => {
            let root = expand_tilde(&cfg.root);
            std::fs::create_dir_all(&root)?;
            Box::new(OpendalBlockStore::new(build_fs_operator(&root)?, &cfg.prefix))
        }
        BackendKind::Memory => {
            tracing::warn!("memory backend: stored blocks are lost when the process exits");
            Box::new(OpendalBlockStore::new(build_memory_operator()?, &cfg.prefix))
        }
    };
    tracing::debug!(backend = %cfg.backend, store = %store.describe(), "block store ready");
    Ok(store)
}
