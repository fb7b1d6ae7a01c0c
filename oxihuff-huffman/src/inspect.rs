//! Header inspection without decoding the payload.

use crate::packer::{BIT_COUNT_SIZE, payload_len, read_bit_count};
use crate::tree_codec::{read_tree, serialize_tree};
use oxihuff_core::Result;
use std::io::{self, Read};

/// Summary of a compressed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Distinct byte values coded by the tree (0 for an empty input).
    pub symbols: usize,
    /// Longest code length in bits.
    pub max_code_len: usize,
    /// Serialized tree size in bytes.
    pub tree_len: u64,
    /// Meaningful payload bits.
    pub payload_bits: u32,
    /// Payload bytes the bit count requires.
    pub payload_len: u64,
    /// Bytes actually present after the header.
    pub stored_len: u64,
}

impl StreamInfo {
    /// Header size (tree plus bit count) in bytes.
    pub fn header_len(&self) -> u64 {
        self.tree_len + BIT_COUNT_SIZE as u64
    }

    /// Whether the stream holds the whole payload.
    pub fn is_complete(&self) -> bool {
        self.stored_len >= self.payload_len
    }

    /// Bytes after the payload, ignored by the decoder.
    pub fn trailing_len(&self) -> u64 {
        self.stored_len.saturating_sub(self.payload_len)
    }

    /// Total stream size in bytes.
    pub fn total_len(&self) -> u64 {
        self.header_len() + self.stored_len
    }
}

/// Parse the header of a compressed stream and measure what follows it.
///
/// Fails on a malformed header; a short payload is reported through
/// [`StreamInfo::is_complete`] instead.
pub fn inspect<R: Read>(mut reader: R) -> Result<StreamInfo> {
    let tree = read_tree(&mut reader)?;
    let payload_bits = read_bit_count(&mut reader)?;
    let stored_len = io::copy(&mut reader, &mut io::sink())?;

    let (symbols, max_code_len) = match &tree {
        None => (0, 0),
        // A leaf root still spends one bit per byte.
        Some(tree) => (tree.leaf_count(), tree.depth().max(1)),
    };

    Ok(StreamInfo {
        symbols,
        max_code_len,
        tree_len: serialize_tree(tree.as_ref()).len() as u64,
        payload_bits,
        payload_len: payload_len(payload_bits),
        stored_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::HuffmanEncoder;

    #[test]
    fn test_inspect_stream() {
        let data = b"inspect this stream";
        let encoder = HuffmanEncoder::for_data(data).unwrap();
        let stream = encoder.encode(data).unwrap();

        let info = inspect(stream.as_slice()).unwrap();
        assert_eq!(info.symbols, 12);
        assert_eq!(info.payload_bits, encoder.total_bits());
        assert_eq!(info.header_len(), encoder.header_len());
        assert_eq!(info.total_len(), stream.len() as u64);
        assert!(info.is_complete());
        assert_eq!(info.trailing_len(), 0);
    }

    #[test]
    fn test_inspect_truncated_payload() {
        let data = b"truncated";
        let stream = HuffmanEncoder::for_data(data).unwrap().encode(data).unwrap();
        let info = inspect(&stream[..stream.len() - 1]).unwrap();
        assert!(!info.is_complete());
    }

    #[test]
    fn test_inspect_single_symbol() {
        let data = [9u8; 3];
        let stream = HuffmanEncoder::for_data(&data).unwrap().encode(&data).unwrap();
        let info = inspect(stream.as_slice()).unwrap();
        assert_eq!(info.symbols, 1);
        assert_eq!(info.max_code_len, 1);
        assert_eq!(info.payload_bits, 3);
    }

    #[test]
    fn test_inspect_empty() {
        let stream = HuffmanEncoder::for_data(b"").unwrap().encode(b"").unwrap();
        let info = inspect(stream.as_slice()).unwrap();
        assert_eq!(info.symbols, 0);
        assert_eq!(info.total_len(), 5);
    }
}
