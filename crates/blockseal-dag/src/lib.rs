//! blockseal-dag: the container format blocks are wrapped in
//!
//! Two protobuf messages, both wire-compatible with IPFS:
//!
//! - `node::PbNode` (dag-pb): `Links` + opaque `Data`. Used twice, once around
//!   the plaintext file node and once around the ciphertext.
//! - `unixfs::UnixfsData`: tags a payload with a type (`File`, `Raw`, ...).
//!
//! ```text
//! stored block = PbNode { Data: nonce || secretbox(frame(PbNode { Data: Unixfs(File, bytes) })) }
//! ```

pub mod error;
pub mod node;
pub mod unixfs;

pub use error::{DagError, DagResult};
pub use node::{unwrap_node, wrap_node, PbLink, PbNode};
pub use unixfs::{DataType, FileNode, NodeKind, UnixfsData};
