use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BlocksealError, BlocksealResult};
use crate::types::BackendKind;

/// Top-level configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksealConfig {
    pub storage: StorageConfig,
    pub codec: CodecConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend holding the blocks: "ipfs", "s3", "fs" or "memory"
    pub backend: BackendKind,
    /// IPFS HTTP RPC API base URL
    pub ipfs_api: String,
    /// S3 endpoint (s3 backend)
    pub endpoint: String,
    /// S3 region (default: us-east-1)
    pub region: String,
    /// S3 bucket name
    pub bucket: String,
    /// Root directory (fs backend)
    pub root: PathBuf,
    /// Object key prefix for blocks (s3, fs and memory backends)
    pub prefix: String,
    /// Refuse plaintext HTTP endpoints instead of warning
    pub enforce_tls: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Padding granularity of the encrypted frame in bytes
    pub block_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Ipfs,
            ipfs_api: "http://localhost:5001".into(),
            endpoint: "http://localhost:8333".into(),
            region: "us-east-1".into(),
            bucket: "blockseal".into(),
            root: PathBuf::from("~/.local/share/blockseal/blocks"),
            prefix: "blockseal".into(),
            enforce_tls: false,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { block_size: 1024 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl BlocksealConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(content: &str) -> BlocksealResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BlocksealError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file at `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> BlocksealResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| BlocksealError::Config(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> BlocksealResult<()> {
        if self.codec.block_size == 0 {
            return Err(BlocksealError::Config(
                "codec.block_size must be greater than zero".into(),
            ));
        }
        if !matches!(self.log.format.as_str(), "json" | "text") {
            return Err(BlocksealError::Config(format!(
                "log.format must be \"json\" or \"text\", got {:?}",
                self.log.format
            )));
        }
        Ok(())
    }
}

/// Expand `~` in path to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(rest)
        }
        None => path.to_path_buf(),
    }
}
