//! Huffman encoder (compression).

use crate::code::CodeTable;
use crate::frequency::ByteFrequencies;
use crate::packer::{BIT_COUNT_SIZE, Packer, payload_len, write_bit_count};
use crate::tree::HuffmanTree;
use crate::tree_codec::{serialize_tree, write_tree};
use oxihuff_core::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Huffman encoder for one input.
///
/// Built from the input's frequency table; the input itself is supplied
/// afterwards, which lets the file pipeline read it twice without holding
/// it in memory.
#[derive(Debug)]
pub struct HuffmanEncoder {
    /// Tree for the input (`None` for empty input).
    tree: Option<HuffmanTree>,
    /// Code of every byte present in the input.
    codes: CodeTable,
    /// Payload size announced in the header.
    total_bits: u32,
}

impl HuffmanEncoder {
    /// Create an encoder for an input with the given byte frequencies.
    ///
    /// Fails with [`OxiHuffError::PayloadTooLarge`] when the payload would
    /// not fit the 32-bit bit count.
    pub fn new(frequencies: &ByteFrequencies) -> Result<Self> {
        // Every byte costs at least one bit.
        if frequencies.total() > u32::MAX as u64 {
            return Err(OxiHuffError::payload_too_large(frequencies.total()));
        }

        let tree = HuffmanTree::build(frequencies);
        let codes = tree
            .as_ref()
            .map(CodeTable::from_tree)
            .unwrap_or_else(CodeTable::empty);

        let bits = codes.encoded_bits(frequencies);
        let total_bits = u32::try_from(bits).map_err(|_| OxiHuffError::payload_too_large(bits))?;

        log::debug!(
            "encoder ready: {} bytes, {} distinct, {} payload bits",
            frequencies.total(),
            codes.len(),
            total_bits
        );
        if log::log_enabled!(log::Level::Trace) {
            for (byte, code) in codes.iter() {
                log::trace!("byte {:#04x} x{} -> {}", byte, frequencies.get(byte), code);
            }
        }

        Ok(Self {
            tree,
            codes,
            total_bits,
        })
    }

    /// Create an encoder for an in-memory input.
    pub fn for_data(data: &[u8]) -> Result<Self> {
        Self::new(&ByteFrequencies::from_bytes(data))
    }

    /// The Huffman tree (`None` for empty input).
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// The code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Meaningful payload bits.
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    /// Size of the header (tree plus bit count) in bytes.
    pub fn header_len(&self) -> u64 {
        serialize_tree(self.tree()).len() as u64 + BIT_COUNT_SIZE as u64
    }

    /// Size of the complete compressed stream in bytes.
    pub fn compressed_len(&self) -> u64 {
        self.header_len() + payload_len(self.total_bits)
    }

    /// Write the serialized tree and the bit count; returns bytes written.
    pub fn write_header<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let tree_len = write_tree(self.tree(), writer)?;
        write_bit_count(writer, self.total_bits)?;
        Ok(tree_len + BIT_COUNT_SIZE as u64)
    }

    /// Pack every byte of `reader` into `writer` and return the writer.
    ///
    /// Fails if the input does not match the frequencies the encoder was
    /// built from.
    pub fn pack_reader<R: Read, W: Write>(
        &self,
        mut reader: R,
        writer: W,
        buffer_size: usize,
    ) -> Result<W> {
        let mut packer = Packer::new(&self.codes, writer);
        let mut buffer = vec![0u8; buffer_size.max(1)];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            packer.write(&buffer[..n])?;
        }

        self.finish(packer)
    }

    /// Pack `data` into `writer` and return the writer.
    pub fn pack<W: Write>(&self, data: &[u8], writer: W) -> Result<W> {
        let mut packer = Packer::new(&self.codes, writer);
        packer.write(data)?;
        self.finish(packer)
    }

    fn finish<W: Write>(&self, packer: Packer<'_, W>) -> Result<W> {
        let (writer, bits) = packer.finish()?;
        if bits != self.total_bits as u64 {
            return Err(OxiHuffError::bit_count_mismatch(self.total_bits as u64, bits));
        }
        Ok(writer)
    }

    /// Produce the complete compressed stream for `data`.
    ///
    /// `data` must be the input the encoder was built from.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.compressed_len() as usize);
        self.write_header(&mut out)?;
        self.pack(data, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_layout() {
        let encoder = HuffmanEncoder::for_data(b"").unwrap();
        assert!(encoder.tree().is_none());
        assert_eq!(encoder.total_bits(), 0);
        assert_eq!(encoder.encode(b"").unwrap(), vec![0x02, 0, 0, 0, 0]);
    }

    #[test]
    fn test_aaab_layout() {
        let encoder = HuffmanEncoder::for_data(b"aaab").unwrap();
        let stream = encoder.encode(b"aaab").unwrap();
        assert_eq!(
            stream,
            vec![
                0x00, 0x01, b'b', 0x01, b'a', // tree
                0, 0, 0, 4, // bit count
                0b1110_0000, // payload
            ]
        );
        assert_eq!(encoder.compressed_len(), stream.len() as u64);
    }

    #[test]
    fn test_single_symbol_layout() {
        let data = vec![0xAB; 10];
        let encoder = HuffmanEncoder::for_data(&data).unwrap();
        let stream = encoder.encode(&data).unwrap();
        assert_eq!(stream, vec![0x01, 0xAB, 0, 0, 0, 10, 0, 0]);
    }

    #[test]
    fn test_input_mismatch() {
        let encoder = HuffmanEncoder::for_data(b"aab").unwrap();
        let err = encoder.pack(b"aabb", Vec::new()).unwrap_err();
        assert!(matches!(err, OxiHuffError::BitCountMismatch { .. }));

        let err = encoder.pack(b"aabc", Vec::new()).unwrap_err();
        assert!(matches!(err, OxiHuffError::MissingCode { byte: b'c' }));
    }

    #[test]
    fn test_pack_reader_small_buffer() {
        let data = b"a small buffer forces many reads of the input";
        let encoder = HuffmanEncoder::for_data(data).unwrap();
        let from_reader = encoder.pack_reader(&data[..], Vec::new(), 3).unwrap();
        let from_slice = encoder.pack(data, Vec::new()).unwrap();
        assert_eq!(from_reader, from_slice);
    }
}
