//! OpenDAL Operator factory for the object-store backends

use opendal::{Builder, Operator};
use std::path::Path;

use blockseal_core::config::StorageConfig;

use crate::error::{StorageError, StorageResult};

/// S3 access credentials, kept out of the config file
#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Attach the logging layer and finish the operator.
///
/// No retry layer: a failed put/get surfaces to the caller as-is.
fn finish<B: Builder>(builder: B) -> StorageResult<Operator> {
    Ok(Operator::new(builder)?
        .layer(opendal::layers::LoggingLayer::default())
        .finish())
}

/// Build an operator for an S3-compatible endpoint.
///
/// Uses path-style addressing (the opendal default), which SeaweedFS and
/// MinIO require. If `enforce_tls` is set and the endpoint is plain HTTP this
/// returns an error; otherwise a warning is logged.
pub fn build_s3_operator(cfg: &StorageConfig, creds: &S3Credentials) -> StorageResult<Operator> {
    if cfg.endpoint.starts_with("http://") {
        if cfg.enforce_tls {
            return Err(StorageError::Config(format!(
                "S3 endpoint uses plaintext HTTP ({}), but enforce_tls is enabled. \
                 Use an HTTPS endpoint or set storage.enforce_tls = false for local development.",
                cfg.endpoint
            )));
        }
        tracing::warn!(
            endpoint = %cfg.endpoint,
            "S3 endpoint uses plaintext HTTP; credentials are transmitted unencrypted"
        );
    }

    let builder = opendal::services::S3::default()
        .endpoint(&cfg.endpoint)
        .region(&cfg.region)
        .bucket(&cfg.bucket)
        .access_key_id(&creds.access_key_id)
        .secret_access_key(&creds.secret_access_key);

    finish(builder)
}

/// Build an operator rooted at a local directory.
pub fn build_fs_operator(root: &Path) -> StorageResult<Operator> {
    let root = root
        .to_str()
        .ok_or_else(|| StorageError::Config(format!("non UTF-8 root: {}", root.display())))?;
    finish(opendal::services::Fs::default().root(root))
}

/// Build a process-local in-memory operator.
pub fn build_memory_operator() -> StorageResult<Operator> {
    finish(opendal::services::Memory::default())
}
