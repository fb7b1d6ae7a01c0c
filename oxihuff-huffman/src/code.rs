//! Code assignment.
//!
//! Codes are the root-to-leaf paths of the tree: `0` for a left branch,
//! `1` for a right branch. A tree whose root is a leaf has no path at all,
//! so its only byte is given the one-bit code `0`; an empty code could not
//! represent repeated occurrences in the packed payload.

use crate::frequency::ByteFrequencies;
use crate::tree::{HuffmanNode, HuffmanTree};
use oxihuff_core::{BitWriter, Result};
use std::fmt;
use std::io::Write;

/// Maximum code length: a tree over 256 leaves is at most 255 levels deep.
pub const MAX_CODE_LENGTH: usize = 255;

/// A variable-length code, stored MSB-first.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: [u8; 32],
    len: u8,
}

impl Code {
    const EMPTY: Self = Self {
        bits: [0; 32],
        len: 0,
    };

    /// Code with `bit` appended.
    fn with_bit(mut self, bit: bool) -> Self {
        let index = self.len as usize;
        debug_assert!(index < MAX_CODE_LENGTH);
        if bit {
            self.bits[index / 8] |= 0x80 >> (index % 8);
        }
        self.len += 1;
        self
    }

    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the code has no bits (never true for an assigned code).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `index`, counted from the first bit emitted.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len(), "bit index out of range");
        self.bits[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Iterate over the bits in emission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|i| self.bit(i))
    }

    /// Whether this code is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len()).all(|i| self.bit(i) == other.bit(i))
    }

    /// Append the code to a bit stream.
    #[inline]
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let full = self.len() / 8;
        for &byte in &self.bits[..full] {
            writer.write_bits(byte as u32, 8)?;
        }
        let rest = (self.len % 8) as u8;
        if rest > 0 {
            writer.write_bits((self.bits[full] >> (8 - rest)) as u32, rest)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// Byte value to code mapping derived from one traversal of a tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// A table with no codes (empty input).
    pub fn empty() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }

    /// Assign a code to every leaf of `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        match tree.root() {
            HuffmanNode::Leaf { byte, .. } => {
                codes[*byte as usize] = Some(Code::EMPTY.with_bit(false));
            }
            root => Self::assign(root, Code::EMPTY, &mut codes),
        }
        Self { codes }
    }

    fn assign(node: &HuffmanNode, prefix: Code, codes: &mut [Option<Code>]) {
        match node {
            HuffmanNode::Leaf { byte, .. } => codes[*byte as usize] = Some(prefix),
            HuffmanNode::Internal { left, right, .. } => {
                Self::assign(left, prefix.with_bit(false), codes);
                Self::assign(right, prefix.with_bit(true), codes);
            }
        }
    }

    /// Code assigned to `byte`, if it occurs in the tree.
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Assigned codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|c| (byte as u8, c)))
    }

    /// Number of assigned codes.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no codes are assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total payload bits needed to encode an input with these frequencies.
    ///
    /// Bytes without a code contribute nothing; the packer rejects them.
    pub fn encoded_bits(&self, frequencies: &ByteFrequencies) -> u64 {
        frequencies
            .iter()
            .filter_map(|(byte, count)| self.get(byte).map(|code| count * code.len() as u64))
            .sum()
    }
}
