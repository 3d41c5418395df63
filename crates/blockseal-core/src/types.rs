use serde::{Deserialize, Serialize};
use std::fmt;

/// Content address of a stored block, as issued by the storage backend.
///
/// The format depends on the backend: an IPFS CID for `ipfs`, a 64-char
/// BLAKE3 hex digest for the OpenDAL backends. It is treated as opaque
/// everywhere except inside the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which storage backend holds the blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// IPFS node reached through its HTTP RPC API
    #[default]
    Ipfs,
    /// S3-compatible object store (via OpenDAL)
    S3,
    /// Local directory (via OpenDAL)
    Fs,
    /// Process-local memory (via OpenDAL); contents vanish on exit
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Ipfs => "ipfs",
            BackendKind::S3 => "s3",
            BackendKind::Fs => "fs",
            BackendKind::Memory => "memory",
        };
        f.write_str(name)
    }
}
