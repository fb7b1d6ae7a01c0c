//! Huffman decoder (decompression).

use crate::config::CodecConfig;
use crate::packer::{BIT_COUNT_SIZE, read_bit_count, unpack};
use crate::tree_codec::{read_tree, serialize_tree};
use oxihuff_core::Result;
use std::io::{Read, Write};

/// Outcome of decoding one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Header size (tree plus bit count) in bytes.
    pub header_len: u64,
    /// Payload bits consumed; equals the stored bit count.
    pub payload_bits: u64,
    /// Decoded bytes written.
    pub bytes_written: u64,
}

/// Huffman decoder for decompression.
#[derive(Debug, Clone, Default)]
pub struct HuffmanDecoder {
    config: CodecConfig,
}

impl HuffmanDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Decode one compressed stream from `reader` into `writer`.
    ///
    /// Reads the tree, then the bit count, then exactly as many payload
    /// bytes as the bit count needs. Anything after the payload is ignored.
    pub fn decode<R: Read, W: Write>(&self, mut reader: R, writer: &mut W) -> Result<DecodeSummary> {
        let tree = read_tree(&mut reader)?;
        let total_bits = read_bit_count(&mut reader)?;
        let header_len = serialize_tree(tree.as_ref()).len() as u64 + BIT_COUNT_SIZE as u64;

        log::debug!(
            "decoding: {} leaves, {} header bytes, {} payload bits",
            tree.as_ref().map_or(0, |t| t.leaf_count()),
            header_len,
            total_bits
        );

        let summary = unpack(
            tree.as_ref(),
            total_bits,
            reader,
            writer,
            self.config.max_output_size,
        )?;

        Ok(DecodeSummary {
            header_len,
            payload_bits: summary.bits_read,
            bytes_written: summary.bytes_written,
        })
    }

    /// Decode an in-memory stream.
    pub fn decode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode(data, &mut out)?;
        Ok(out)
    }
}
