//! dag-pb node: the generic outer container
//!
//! ```protobuf
//! message PBLink { optional bytes Hash = 1; optional string Name = 2; optional uint64 Tsize = 3; }
//! message PBNode { repeated PBLink Links = 2; optional bytes Data = 1; }
//! ```
//!
//! Blocks written here never carry links; the field exists so that nodes
//! produced by other IPFS tooling still parse.

use prost::Message;

use crate::error::{DagError, DagResult};

#[derive(Clone, PartialEq, Message)]
pub struct PbLink {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub hash: Option<Vec<u8>>,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    #[prost(uint64, optional, tag = "3")]
    pub tsize: Option<u64>,
}

#[derive(Clone, PartialEq, Message)]
pub struct PbNode {
    #[prost(message, repeated, tag = "2")]
    pub links: Vec<PbLink>,
    #[prost(bytes = "vec", optional, tag = "1")]
    pub data: Option<Vec<u8>>,
}

impl PbNode {
    /// A link-less node carrying `data`
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            links: Vec::new(),
            data: Some(data),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> DagResult<Self> {
        Self::decode(bytes).map_err(DagError::Node)
    }

    /// The node payload; an absent `Data` field reads as empty.
    pub fn into_data(self) -> Vec<u8> {
        self.data.unwrap_or_default()
    }
}

/// Wrap `data` in a link-less dag-pb node and serialize it.
pub fn wrap_node(data: Vec<u8>) -> Vec<u8> {
    PbNode::with_data(data).to_bytes()
}

/// Parse a serialized dag-pb node and return its payload.
pub fn unwrap_node(bytes: &[u8]) -> DagResult<Vec<u8>> {
    PbNode::from_bytes(bytes).map(PbNode::into_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wire_layout_of_data_only_node() {
        // field 1, wire type 2 (0x0a), varint length 3, payload
        let encoded = wrap_node(b"abc".to_vec());
        assert_eq!(encoded, vec![0x0a, 0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn test_missing_data_reads_as_empty() {
        let node = PbNode::default();
        let encoded = node.to_bytes();
        assert!(encoded.is_empty());
        assert_eq!(unwrap_node(&encoded).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_node_with_links_still_unwraps() {
        let node = PbNode {
            links: vec![PbLink {
                hash: Some(vec![0x12, 0x20, 0xAA]),
                name: Some("child".into()),
                tsize: Some(42),
            }],
            data: Some(b"payload".to_vec()),
        };
        let data = unwrap_node(&node.to_bytes()).unwrap();
        assert_eq!(data, b"payload");
    }

    #[test]
    fn test_garbage_is_rejected() {
        // field 1, wire type 2, declared length 100 with only 2 bytes following
        let result = unwrap_node(&[0x0a, 0x64, 0x01, 0x02]);
        assert!(matches!(result, Err(DagError::Node(_))));
    }

    proptest! {
        #[test]
        fn wrap_unwrap_preserves_payload(data in proptest::collection::vec(any::<u8>(), 0..=2048)) {
            let encoded = wrap_node(data.clone());
            prop_assert_eq!(unwrap_node(&encoded).unwrap(), data);
        }
    }
}
