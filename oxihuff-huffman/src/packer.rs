//! Payload packing and unpacking.
//!
//! The payload is the concatenation of each input byte's code, packed
//! MSB-first. Its meaningful length in bits is stored as a big-endian `u32`
//! ahead of it; the zero bits padding the last byte are never decoded.

use crate::code::CodeTable;
use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::{BitReader, BitWriter, OxiHuffError, Result};
use std::io::{Read, Write};

/// Size of the bit count field in bytes.
pub const BIT_COUNT_SIZE: usize = 4;

/// Write the payload bit count field.
pub fn write_bit_count<W: Write>(writer: &mut W, bits: u32) -> Result<()> {
    writer.write_all(&bits.to_be_bytes())?;
    Ok(())
}

/// Read the payload bit count field.
pub fn read_bit_count<R: Read>(reader: &mut R) -> Result<u32> {
    let mut bytes = [0u8; BIT_COUNT_SIZE];
    reader
        .read_exact(&mut bytes)
        .map_err(|e| OxiHuffError::from_read(e, "bit count"))?;
    Ok(u32::from_be_bytes(bytes))
}

/// Number of payload bytes holding `bits` bits.
pub fn payload_len(bits: u32) -> u64 {
    (bits as u64).div_ceil(8)
}

/// Streams input bytes into packed codes.
#[derive(Debug)]
pub struct Packer<'a, W: Write> {
    codes: &'a CodeTable,
    bits: BitWriter<W>,
}

impl<'a, W: Write> Packer<'a, W> {
    /// Create a packer writing to `writer`.
    pub fn new(codes: &'a CodeTable, writer: W) -> Self {
        Self {
            codes,
            bits: BitWriter::new(writer),
        }
    }

    /// Append the codes of `data` in order.
    ///
    /// Fails with [`OxiHuffError::MissingCode`] for a byte outside the table.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.codes
                .get(byte)
                .ok_or_else(|| OxiHuffError::missing_code(byte))?
                .write_to(&mut self.bits)?;
        }
        Ok(())
    }

    /// Meaningful bits packed so far.
    pub fn bits_written(&self) -> u64 {
        self.bits.bits_written()
    }

    /// Zero-pad the final byte and return the writer with the packed bit count.
    pub fn finish(self) -> Result<(W, u64)> {
        let bits = self.bits.bits_written();
        Ok((self.bits.into_inner()?, bits))
    }
}

/// Outcome of unpacking a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackSummary {
    /// Payload bits consumed; always equals the stored bit count.
    pub bits_read: u64,
    /// Decoded bytes written.
    pub bytes_written: u64,
}

/// Decode exactly `total_bits` payload bits from `reader` into `writer`.
///
/// Bits after `total_bits` (padding, trailing bytes) are left unread.
/// `max_output` bounds the number of decoded bytes.
pub fn unpack<R: Read, W: Write>(
    tree: Option<&HuffmanTree>,
    total_bits: u32,
    reader: R,
    writer: &mut W,
    max_output: Option<u64>,
) -> Result<UnpackSummary> {
    let Some(tree) = tree else {
        if total_bits != 0 {
            return Err(OxiHuffError::corrupted(
                0,
                format!("empty tree with a payload of {} bits", total_bits),
            ));
        }
        return Ok(UnpackSummary {
            bits_read: 0,
            bytes_written: 0,
        });
    };

    let mut unpacker = Unpacker {
        bits: BitReader::new(reader),
        total_bits: total_bits as u64,
        out: Vec::with_capacity(OUTPUT_CHUNK),
        written: 0,
        max_output,
    };

    match tree.root() {
        HuffmanNode::Leaf { byte, .. } => unpacker.unpack_single(*byte, writer)?,
        root => unpacker.unpack_tree(root, writer)?,
    }
    unpacker.flush(writer)?;

    Ok(UnpackSummary {
        bits_read: unpacker.bits.bits_read(),
        bytes_written: unpacker.written,
    })
}

const OUTPUT_CHUNK: usize = 8 * 1024;

struct Unpacker<R: Read> {
    bits: BitReader<R>,
    total_bits: u64,
    out: Vec<u8>,
    written: u64,
    max_output: Option<u64>,
}

impl<R: Read> Unpacker<R> {
    fn next_bit(&mut self) -> Result<bool> {
        match self.bits.read_bit() {
            Err(OxiHuffError::UnexpectedEof { .. }) => Err(OxiHuffError::corrupted(
                self.bits.bits_read() / 8,
                format!(
                    "payload truncated: {} of {} bits available",
                    self.bits.bits_read(),
                    self.total_bits
                ),
            )),
            other => other,
        }
    }

    fn emit<W: Write>(&mut self, byte: u8, writer: &mut W) -> Result<()> {
        if let Some(limit) = self.max_output {
            if self.written >= limit {
                return Err(OxiHuffError::output_limit(limit));
            }
        }
        self.out.push(byte);
        self.written += 1;
        if self.out.len() >= OUTPUT_CHUNK {
            self.flush(writer)?;
        }
        Ok(())
    }

    fn flush<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.out)?;
        self.out.clear();
        Ok(())
    }

    /// Leaf root: every code is the single bit `0`.
    fn unpack_single<W: Write>(&mut self, byte: u8, writer: &mut W) -> Result<()> {
        for _ in 0..self.total_bits {
            if self.next_bit()? {
                return Err(OxiHuffError::invalid_huffman(self.bits.bits_read() - 1));
            }
            self.emit(byte, writer)?;
        }
        Ok(())
    }

    fn unpack_tree<W: Write>(&mut self, root: &HuffmanNode, writer: &mut W) -> Result<()> {
        let mut node = root;
        let mut code_start = 0u64;

        for _ in 0..self.total_bits {
            let HuffmanNode::Internal { left, right, .. } = node else {
                return Err(OxiHuffError::corrupted(code_start / 8, "walk stopped on a leaf"));
            };
            node = if self.next_bit()? { right.as_ref() } else { left.as_ref() };

            if let HuffmanNode::Leaf { byte, .. } = node {
                self.emit(*byte, writer)?;
                node = root;
                code_start = self.bits.bits_read();
            }
        }

        if !std::ptr::eq(node, root) {
            return Err(OxiHuffError::corrupted(
                code_start / 8,
                format!(
                    "payload ends inside a code starting at bit {}",
                    code_start
                ),
            ));
        }
        Ok(())
    }
}
