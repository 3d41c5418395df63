//! unixfs node: tags a payload with a file-system type
//!
//! ```protobuf
//! message Data {
//!     enum DataType { Raw = 0; Directory = 1; File = 2; Metadata = 3; Symlink = 4; HAMTShard = 5; }
//!     required DataType Type = 1;
//!     optional bytes Data = 2;
//!     optional uint64 filesize = 3;
//!     repeated uint64 blocksizes = 4;
//!     optional uint64 hashType = 5;
//!     optional uint64 fanout = 6;
//! }
//! ```

use prost::Message;

use crate::error::{DagError, DagResult};
use crate::node::{unwrap_node, wrap_node};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    Raw = 0,
    Directory = 1,
    File = 2,
    Metadata = 3,
    Symlink = 4,
    HamtShard = 5,
}

#[derive(Clone, PartialEq, Message)]
pub struct UnixfsData {
    /// Required on the wire; `None` only when decoding a node that omits it
    #[prost(enumeration = "DataType", optional, tag = "1")]
    pub data_type: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub data: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "3")]
    pub filesize: Option<u64>,
    #[prost(uint64, repeated, packed = "false", tag = "4")]
    pub blocksizes: Vec<u64>,
    #[prost(uint64, optional, tag = "5")]
    pub hash_type: Option<u64>,
    #[prost(uint64, optional, tag = "6")]
    pub fanout: Option<u64>,
}

/// The type tag of a decoded node, collapsed to what the codec cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Raw,
    /// Any other known type, or an unknown wire value
    Other(i32),
}

impl NodeKind {
    fn from_wire(value: i32) -> Self {
        match DataType::try_from(value) {
            Ok(DataType::File) => NodeKind::File,
            Ok(DataType::Raw) => NodeKind::Raw,
            _ => NodeKind::Other(value),
        }
    }

    fn to_wire(self) -> i32 {
        match self {
            NodeKind::File => DataType::File as i32,
            NodeKind::Raw => DataType::Raw as i32,
            NodeKind::Other(value) => value,
        }
    }

    /// Whether the payload is a plain file body
    pub fn is_file_like(self) -> bool {
        matches!(self, NodeKind::File | NodeKind::Raw)
    }

    /// Human-readable type name for error messages
    pub fn name(self) -> String {
        match self {
            NodeKind::File => "file".into(),
            NodeKind::Raw => "raw".into(),
            NodeKind::Other(value) => match DataType::try_from(value) {
                Ok(DataType::Directory) => "directory".into(),
                Ok(DataType::Metadata) => "metadata".into(),
                Ok(DataType::Symlink) => "symlink".into(),
                Ok(DataType::HamtShard) => "hamt-shard".into(),
                _ => format!("unknown({value})"),
            },
        }
    }
}

/// A typed payload, the inner node of a stored block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub kind: NodeKind,
    pub data: Vec<u8>,
}

impl FileNode {
    /// A `File`-typed node holding a whole file.
    pub fn file(data: Vec<u8>) -> Self {
        Self {
            kind: NodeKind::File,
            data,
        }
    }

    /// Serialize as a unixfs message wrapped in a dag-pb node.
    ///
    /// An empty body leaves the unixfs `Data` field unset and `filesize`
    /// records the body length, matching what IPFS writes for a single-block
    /// file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let unixfs = UnixfsData {
            data_type: Some(self.kind.to_wire()),
            data: (!self.data.is_empty()).then(|| self.data.clone()),
            filesize: Some(self.data.len() as u64),
            ..Default::default()
        };
        wrap_node(unixfs.encode_to_vec())
    }

    /// Parse a dag-pb node and the unixfs message inside it.
    ///
    /// A unixfs message without a `Type` is rejected, including the empty
    /// message an empty node decodes to.
    pub fn from_bytes(bytes: &[u8]) -> DagResult<Self> {
        let inner = unwrap_node(bytes)?;
        let unixfs = UnixfsData::decode(inner.as_slice()).map_err(DagError::Unixfs)?;
        let data_type = unixfs.data_type.ok_or(DagError::MissingType)?;
        Ok(Self {
            kind: NodeKind::from_wire(data_type),
            data: unixfs.data.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::PbNode;
    use proptest::prelude::*;

    fn unixfs_bytes(data_type: i32, data: &[u8]) -> Vec<u8> {
        let msg = UnixfsData {
            data_type: Some(data_type),
            data: Some(data.to_vec()),
            ..Default::default()
        };
        wrap_node(msg.encode_to_vec())
    }

    #[test]
    fn test_file_node_wire_layout() {
        // PbNode{ Data: Unixfs{ Type: File, Data: "hi", filesize: 2 } }
        let encoded = FileNode::file(b"hi".to_vec()).to_bytes();
        let unixfs = [0x08, 0x02, 0x12, 0x02, b'h', b'i', 0x18, 0x02];
        let mut expected = vec![0x0a, unixfs.len() as u8];
        expected.extend_from_slice(&unixfs);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_empty_file_omits_data_field() {
        let encoded = FileNode::file(Vec::new()).to_bytes();
        let inner = PbNode::from_bytes(&encoded).unwrap().into_data();
        let unixfs = UnixfsData::decode(inner.as_slice()).unwrap();
        assert_eq!(unixfs.data, None);
        assert_eq!(unixfs.filesize, Some(0));

        let parsed = FileNode::from_bytes(&encoded).unwrap();
        assert_eq!(parsed, FileNode::file(Vec::new()));
    }

    #[test]
    fn test_raw_node_is_file_like() {
        let parsed = FileNode::from_bytes(&unixfs_bytes(DataType::Raw as i32, b"raw")).unwrap();
        assert_eq!(parsed.kind, NodeKind::Raw);
        assert!(parsed.kind.is_file_like());
        assert_eq!(parsed.data, b"raw");
    }

    #[test]
    fn test_directory_node_is_not_file_like() {
        let parsed =
            FileNode::from_bytes(&unixfs_bytes(DataType::Directory as i32, b"")).unwrap();
        assert_eq!(parsed.kind, NodeKind::Other(DataType::Directory as i32));
        assert!(!parsed.kind.is_file_like());
        assert_eq!(parsed.kind.name(), "directory");
    }

    #[test]
    fn test_unknown_type_value_is_preserved() {
        let parsed = FileNode::from_bytes(&unixfs_bytes(99, b"?")).unwrap();
        assert_eq!(parsed.kind, NodeKind::Other(99));
        assert_eq!(parsed.kind.name(), "unknown(99)");
    }

    #[test]
    fn test_malformed_unixfs_is_rejected() {
        // valid dag-pb node whose payload is a truncated unixfs message
        let encoded = wrap_node(vec![0x12, 0x10, 0x00]);
        assert!(matches!(
            FileNode::from_bytes(&encoded),
            Err(DagError::Unixfs(_))
        ));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        // unixfs { Data: "hi" } with no Type field
        let encoded = wrap_node(vec![0x12, 0x02, b'h', b'i']);
        assert!(matches!(
            FileNode::from_bytes(&encoded),
            Err(DagError::MissingType)
        ));
    }

    #[test]
    fn test_empty_node_is_rejected() {
        assert!(matches!(
            FileNode::from_bytes(&[]),
            Err(DagError::MissingType)
        ));
        assert!(matches!(
            FileNode::from_bytes(&wrap_node(Vec::new())),
            Err(DagError::MissingType)
        ));
    }

    #[test]
    fn test_raw_type_is_written_explicitly() {
        let node = FileNode {
            kind: NodeKind::Raw,
            data: b"x".to_vec(),
        };
        let parsed = FileNode::from_bytes(&node.to_bytes()).unwrap();
        assert_eq!(parsed.kind, NodeKind::Raw);
    }

    proptest! {
        #[test]
        fn file_node_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
            let node = FileNode::file(data);
            let parsed = FileNode::from_bytes(&node.to_bytes()).unwrap();
            prop_assert_eq!(parsed, node);
        }
    }
}
