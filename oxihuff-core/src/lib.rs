//! # OxiHuff Core
//!
//! Core components for the OxiHuff static Huffman compressor.
//!
//! - [`bitstream`]: MSB-first bit I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxihuff compress / decompress / info / test         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     frequencies, tree, codes, tree codec, packer        │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitReader/BitWriter, OxiHuffError                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b1010, 4).unwrap();
//! let data = writer.into_inner().unwrap();
//!
//! let mut reader = BitReader::new(data.as_slice());
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};
