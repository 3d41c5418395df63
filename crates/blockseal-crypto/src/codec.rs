//! Block codec: file bytes ⇄ stored block
//!
//! Each call is independent: keys, nonces and buffers never outlive the call
//! that created them, so concurrent encodes/decodes need no coordination.

use blockseal_dag::{unwrap_node, wrap_node, FileNode};
use tracing::debug;

use crate::cipher::{open, seal};
use crate::error::{CodecError, CodecResult};
use crate::frame::{frame, unframe};
use crate::keys::{generate_key, SecretKey};

/// A fully formed stored block and the key that opens it.
#[derive(Debug)]
pub struct EncodedBlock {
    /// Serialized outer node, ready for the storage backend
    pub block: Vec<u8>,
    pub key: SecretKey,
}

/// Encode `raw` under a freshly generated key.
pub fn encode_block(raw: &[u8], block_size: usize) -> CodecResult<EncodedBlock> {
    let key = generate_key()?;
    let block = encode_block_with_key(raw, &key, block_size)?;
    Ok(EncodedBlock { block, key })
}

/// Encode `raw` under `key`.
///
/// file node → frame → seal → outer node. The caller must not reuse a key it
/// cannot guarantee fresh nonces for; `seal` draws a random nonce per call.
pub fn encode_block_with_key(
    raw: &[u8],
    key: &SecretKey,
    block_size: usize,
) -> CodecResult<Vec<u8>> {
    let inner = FileNode::file(raw.to_vec()).to_bytes();
    let framed = frame(&inner, block_size)?;
    let sealed = seal(&framed, key)?;
    let block = wrap_node(sealed);

    debug!(
        file_bytes = raw.len(),
        node_bytes = inner.len(),
        frame_bytes = framed.len(),
        block_bytes = block.len(),
        "encoded block"
    );
    Ok(block)
}

/// Decode a stored block back to the raw file bytes.
///
/// Fails without returning any plaintext if the block does not authenticate
/// under `key`, and with `UnsupportedNodeType` if the recovered node is
/// neither a file nor a raw node.
pub fn decode_block(block: &[u8], key: &SecretKey) -> CodecResult<Vec<u8>> {
    let sealed = unwrap_node(block)?;
    let framed = open(&sealed, key)?;
    let inner = unframe(&framed)?;
    let node = FileNode::from_bytes(inner)?;

    if !node.kind.is_file_like() {
        return Err(CodecError::UnsupportedNodeType(node.kind.name()));
    }

    debug!(
        block_bytes = block.len(),
        frame_bytes = framed.len(),
        file_bytes = node.data.len(),
        "decoded block"
    );
    Ok(node.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_BLOCK_SIZE, NONCE_SIZE, TAG_SIZE};
    use blockseal_dag::{DagError, DataType, PbNode, UnixfsData};
    use prost::Message;
    use proptest::prelude::*;

    /// Seal an arbitrary inner node the way `encode_block_with_key` would.
    fn seal_inner(inner: &[u8], key: &SecretKey) -> Vec<u8> {
        let framed = frame(inner, DEFAULT_BLOCK_SIZE).unwrap();
        wrap_node(seal(&framed, key).unwrap())
    }

    fn sealed_frame_len(block: &[u8]) -> usize {
        PbNode::from_bytes(block).unwrap().into_data().len() - NONCE_SIZE - TAG_SIZE
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let raw = b"the quick brown fox jumps over the lazy dog";
        let encoded = encode_block(raw, DEFAULT_BLOCK_SIZE).unwrap();
        let decoded = decode_block(&encoded.block, &encoded.key).unwrap();
        assert_eq!(decoded, raw);
    }

    #[test]
    fn test_empty_file_scenario() {
        let encoded = encode_block(b"", DEFAULT_BLOCK_SIZE).unwrap();
        assert_eq!(sealed_frame_len(&encoded.block), 1024);
        assert_eq!(decode_block(&encoded.block, &encoded.key).unwrap(), b"");
    }

    #[test]
    fn test_2000_byte_file_scenario() {
        let raw: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
        let key = generate_key().unwrap();

        // The 2000 bytes are framed as a serialized node, which adds a few
        // bytes of protobuf overhead but stays inside two blocks.
        let block = encode_block_with_key(&raw, &key, DEFAULT_BLOCK_SIZE).unwrap();
        assert_eq!(sealed_frame_len(&block), 2048);
        assert_eq!(decode_block(&block, &key).unwrap(), raw);
    }

    #[test]
    fn test_tampered_block_fails_authentication() {
        let encoded = encode_block(b"do not touch", DEFAULT_BLOCK_SIZE).unwrap();

        let mut sealed = PbNode::from_bytes(&encoded.block).unwrap().into_data();
        sealed[NONCE_SIZE + 3] ^= 0x01;
        let tampered = wrap_node(sealed);

        assert!(matches!(
            decode_block(&tampered, &encoded.key),
            Err(CodecError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let encoded = encode_block(b"for one key only", DEFAULT_BLOCK_SIZE).unwrap();
        let other = generate_key().unwrap();
        assert!(matches!(
            decode_block(&encoded.block, &other),
            Err(CodecError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_directory_node_rejected() {
        let key = generate_key().unwrap();
        let dir = UnixfsData {
            data_type: Some(DataType::Directory as i32),
            ..Default::default()
        };
        let block = seal_inner(&wrap_node(dir.encode_to_vec()), &key);

        match decode_block(&block, &key) {
            Err(CodecError::UnsupportedNodeType(name)) => assert_eq!(name, "directory"),
            other => panic!("expected UnsupportedNodeType, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_node_accepted() {
        let key = generate_key().unwrap();
        let raw = UnixfsData {
            data_type: Some(DataType::Raw as i32),
            data: Some(b"raw leaf".to_vec()),
            ..Default::default()
        };
        let block = seal_inner(&wrap_node(raw.encode_to_vec()), &key);
        assert_eq!(decode_block(&block, &key).unwrap(), b"raw leaf");
    }

    #[test]
    fn test_garbage_inner_node_is_malformed() {
        let key = generate_key().unwrap();
        let block = seal_inner(&[0x0a, 0x7f, 0x00], &key);
        assert!(matches!(
            decode_block(&block, &key),
            Err(CodecError::MalformedNode(_))
        ));
    }

    #[test]
    fn test_untyped_inner_node_is_malformed() {
        let key = generate_key().unwrap();
        // inner node carries unixfs { Data: "hi" } but no Type
        let block = seal_inner(&wrap_node(vec![0x12, 0x02, b'h', b'i']), &key);
        assert!(matches!(
            decode_block(&block, &key),
            Err(CodecError::MalformedNode(DagError::MissingType))
        ));
    }

    #[test]
    fn test_empty_inner_node_is_malformed() {
        let key = generate_key().unwrap();
        // frame declaring a zero-length payload
        let block = seal_inner(&[], &key);
        assert!(matches!(
            decode_block(&block, &key),
            Err(CodecError::MalformedNode(DagError::MissingType))
        ));
    }

    #[test]
    fn test_outer_node_without_data_is_malformed_ciphertext() {
        let key = generate_key().unwrap();
        let block = PbNode::default().to_bytes();
        assert!(matches!(
            decode_block(&block, &key),
            Err(CodecError::MalformedCiphertext { len: 0, .. })
        ));
    }

    #[test]
    fn test_larger_block_size() {
        let encoded = encode_block(&[9u8; 100], 4096).unwrap();
        assert_eq!(sealed_frame_len(&encoded.block), 4096);
        assert_eq!(decode_block(&encoded.block, &encoded.key).unwrap(), vec![9u8; 100]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn encode_decode_roundtrip(raw in proptest::collection::vec(any::<u8>(), 0..=6000)) {
            let encoded = encode_block(&raw, DEFAULT_BLOCK_SIZE).unwrap();
            prop_assert_eq!(sealed_frame_len(&encoded.block) % DEFAULT_BLOCK_SIZE, 0);
            prop_assert_eq!(decode_block(&encoded.block, &encoded.key).unwrap(), raw);
        }
    }
}
