//! Tree serialization for the stream header.
//!
//! The tree is written pre-order, one marker byte per node:
//!
//! ```text
//! leaf      := 0x01 <byte>
//! internal  := 0x00 <left subtree> <right subtree>
//! empty     := 0x02            (whole tree, empty input only)
//! ```
//!
//! The encoding is self-delimiting; no length prefix is needed. A tree of
//! `n` leaves takes `3n - 1` bytes.

use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::{OxiHuffError, Result};
use std::io::{Read, Write};

/// Marker of an internal node.
pub const MARKER_INTERNAL: u8 = 0x00;

/// Marker of a leaf node; the byte value follows.
pub const MARKER_LEAF: u8 = 0x01;

/// Marker of an empty tree (empty input).
pub const MARKER_EMPTY: u8 = 0x02;

/// Deepest internal-node nesting a valid tree can have.
pub const MAX_TREE_DEPTH: usize = 255;

/// Write the serialized tree (`None` = empty tree) and return its size in bytes.
pub fn write_tree<W: Write>(tree: Option<&HuffmanTree>, writer: &mut W) -> Result<u64> {
    let bytes = serialize_tree(tree);
    writer.write_all(&bytes)?;
    Ok(bytes.len() as u64)
}

/// Serialize a tree (`None` = empty tree) into bytes.
pub fn serialize_tree(tree: Option<&HuffmanTree>) -> Vec<u8> {
    let Some(tree) = tree else {
        return vec![MARKER_EMPTY];
    };

    let mut out = Vec::with_capacity(3 * tree.leaf_count());
    serialize_node(tree.root(), &mut out);
    out
}

fn serialize_node(node: &HuffmanNode, out: &mut Vec<u8>) {
    match node {
        HuffmanNode::Leaf { byte, .. } => {
            out.push(MARKER_LEAF);
            out.push(*byte);
        }
        HuffmanNode::Internal { left, right, .. } => {
            out.push(MARKER_INTERNAL);
            serialize_node(left, out);
            serialize_node(right, out);
        }
    }
}

/// Read a serialized tree from the start of `reader`.
///
/// Consumes exactly the tree bytes. Returns `None` for the empty-tree marker.
/// Nodes read back carry zero frequencies.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<Option<HuffmanTree>> {
    let mut parser = TreeParser {
        reader,
        offset: 0,
        leaves: 0,
        seen: [false; 256],
    };

    let marker = parser.read_byte("tree marker")?;
    if marker == MARKER_EMPTY {
        return Ok(None);
    }

    let root = parser.parse_node(marker, 0)?;
    Ok(Some(HuffmanTree::from_root(root)))
}

/// Deserialize a tree from a byte slice, returning it with its encoded size.
pub fn deserialize_tree(data: &[u8]) -> Result<(Option<HuffmanTree>, usize)> {
    let mut cursor = data;
    let tree = read_tree(&mut cursor)?;
    Ok((tree, data.len() - cursor.len()))
}

struct TreeParser<'a, R: Read> {
    reader: &'a mut R,
    offset: u64,
    leaves: usize,
    seen: [bool; 256],
}

impl<R: Read> TreeParser<'_, R> {
    fn read_byte(&mut self, context: &'static str) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.reader
            .read_exact(&mut byte)
            .map_err(|e| OxiHuffError::from_read(e, context))?;
        self.offset += 1;
        Ok(byte[0])
    }

    /// Parse the node whose marker (at `offset - 1`) was just read.
    fn parse_node(&mut self, marker: u8, depth: usize) -> Result<HuffmanNode> {
        match marker {
            MARKER_LEAF => {
                let byte = self.read_byte("leaf byte")?;
                if self.seen[byte as usize] {
                    return Err(OxiHuffError::corrupted(
                        self.offset - 1,
                        format!("byte {:#04x} appears in two leaves", byte),
                    ));
                }
                self.seen[byte as usize] = true;
                self.leaves += 1;
                Ok(HuffmanNode::Leaf { byte, frequency: 0 })
            }
            MARKER_INTERNAL => {
                if depth >= MAX_TREE_DEPTH {
                    return Err(OxiHuffError::corrupted(
                        self.offset - 1,
                        format!("tree deeper than {} levels", MAX_TREE_DEPTH),
                    ));
                }
                let marker = self.read_byte("tree marker")?;
                let left = self.parse_node(marker, depth + 1)?;
                let marker = self.read_byte("tree marker")?;
                let right = self.parse_node(marker, depth + 1)?;
                Ok(HuffmanNode::Internal {
                    frequency: 0,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            other => Err(OxiHuffError::invalid_marker(other, self.offset - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::ByteFrequencies;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&ByteFrequencies::from_bytes(data)).unwrap()
    }

    #[test]
    fn test_leaf_root_layout() {
        let tree = tree_for(b"aaaa");
        assert_eq!(serialize_tree(Some(&tree)), vec![MARKER_LEAF, b'a']);
    }

    #[test]
    fn test_two_leaf_layout() {
        let tree = tree_for(b"aaab");
        assert_eq!(
            serialize_tree(Some(&tree)),
            vec![MARKER_INTERNAL, MARKER_LEAF, b'b', MARKER_LEAF, b'a']
        );
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(serialize_tree(None), vec![MARKER_EMPTY]);
        let (tree, used) = deserialize_tree(&[MARKER_EMPTY, 0xAA]).unwrap();
        assert!(tree.is_none());
        assert_eq!(used, 1);
    }

    #[test]
    fn test_structural_roundtrip() {
        for data in [
            &b"z"[..],
            b"aaab",
            b"hello, world",
            b"the quick brown fox jumps over the lazy dog",
        ] {
            let tree = tree_for(data);
            let bytes = serialize_tree(Some(&tree));
            assert_eq!(bytes.len(), 3 * tree.leaf_count() - 1);

            let (decoded, used) = deserialize_tree(&bytes).unwrap();
            let decoded = decoded.unwrap();
            assert_eq!(used, bytes.len());
            assert!(tree.same_structure(&decoded));
        }
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = tree_for(&data);
        let bytes = serialize_tree(Some(&tree));
        let (decoded, _) = deserialize_tree(&bytes).unwrap();
        assert!(tree.same_structure(&decoded.unwrap()));
    }

    #[test]
    fn test_read_stops_after_tree() {
        let tree = tree_for(b"abcabc");
        let mut bytes = serialize_tree(Some(&tree));
        let tree_len = bytes.len();
        bytes.extend_from_slice(&[0xDE, 0xAD]);

        let mut reader = bytes.as_slice();
        read_tree(&mut reader).unwrap();
        assert_eq!(reader, &[0xDE, 0xAD]);
        assert_eq!(bytes.len() - reader.len(), tree_len);
    }

    #[test]
    fn test_invalid_marker() {
        let err = deserialize_tree(&[MARKER_INTERNAL, 0x07]).unwrap_err();
        assert!(matches!(
            err,
            OxiHuffError::InvalidMarker {
                marker: 0x07,
                offset: 1
            }
        ));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_empty_marker_inside_tree() {
        let err = deserialize_tree(&[MARKER_INTERNAL, MARKER_EMPTY]).unwrap_err();
        assert!(matches!(err, OxiHuffError::InvalidMarker { marker: MARKER_EMPTY, .. }));
    }

    #[test]
    fn test_truncated_tree() {
        let tree = tree_for(b"hello, world");
        let bytes = serialize_tree(Some(&tree));
        for cut in 0..bytes.len() {
            let err = deserialize_tree(&bytes[..cut]).unwrap_err();
            assert!(err.is_corruption(), "cut at {} gave {:?}", cut, err);
        }
    }

    #[test]
    fn test_duplicate_leaf() {
        let bytes = [MARKER_INTERNAL, MARKER_LEAF, b'x', MARKER_LEAF, b'x'];
        let err = deserialize_tree(&bytes).unwrap_err();
        assert!(matches!(err, OxiHuffError::CorruptedData { offset: 4, .. }));
    }

    #[test]
    fn test_depth_limit() {
        let bytes = vec![MARKER_INTERNAL; MAX_TREE_DEPTH + 10];
        let err = deserialize_tree(&bytes).unwrap_err();
        assert!(matches!(err, OxiHuffError::CorruptedData { .. }));
    }
}
