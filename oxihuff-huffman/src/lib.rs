//! # OxiHuff Huffman
//!
//! Pure Rust static Huffman compression.
//!
//! The input's byte frequencies determine an optimal prefix code. The code
//! tree is stored in front of the packed bits, which makes every compressed
//! stream self-describing.
//!
//! ## Stream Format
//!
//! ```text
//! +------------------+-------------------+---------------------------+
//! | serialized tree  | bit count (u32 BE)| payload (MSB-first, padded)|
//! +------------------+-------------------+---------------------------+
//! ```
//!
//! - Tree, pre-order: `0x01 <byte>` for a leaf, `0x00 <left> <right>` for an
//!   internal node, or a lone `0x02` for an empty input.
//! - Bit count: number of meaningful payload bits.
//! - Payload: `ceil(bits / 8)` bytes; the last byte is zero-padded.
//!
//! An input with a single distinct byte codes that byte as the one bit `0`.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use oxihuff_huffman::{CodecConfig, compress_file, decompress_file};
//!
//! let config = CodecConfig::default();
//! compress_file("notes.txt", "notes.ohf", &config).unwrap();
//! decompress_file("notes.ohf", "notes.out", &config).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod inspect;
pub mod packer;
pub mod pipeline;
pub mod tree;
pub mod tree_codec;

pub use code::{Code, CodeTable};
pub use config::CodecConfig;
pub use decoder::{DecodeSummary, HuffmanDecoder};
pub use encoder::HuffmanEncoder;
pub use frequency::ByteFrequencies;
pub use inspect::{StreamInfo, inspect};
pub use oxihuff_core::{OxiHuffError, Result};
pub use pipeline::{CompressionStats, DecompressionStats, compress_file, decompress_file};
pub use tree::{HuffmanNode, HuffmanTree};

use std::io::{Read, Write};

/// Compress an in-memory buffer.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::compress;
///
/// let compressed = compress(b"aaab").unwrap();
/// // tree (5 bytes) + bit count (4 bytes) + payload (1 byte)
/// assert_eq!(compressed.len(), 10);
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::for_data(data)?.encode(data)
}

/// Compress an in-memory buffer into `writer`; returns bytes written.
pub fn compress_to_writer<W: Write>(data: &[u8], mut writer: W) -> Result<u64> {
    let encoder = HuffmanEncoder::for_data(data)?;
    encoder.write_header(&mut writer)?;
    encoder.pack(data, writer)?;
    Ok(encoder.compressed_len())
}

/// Decompress an in-memory stream.
///
/// # Example
///
/// ```rust
/// use oxihuff_huffman::{compress, decompress};
///
/// let compressed = compress(b"").unwrap();
/// assert!(decompress(&compressed).unwrap().is_empty());
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::default().decode_to_vec(data)
}

/// Decompress one stream from `reader` into `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    reader: R,
    writer: &mut W,
    config: &CodecConfig,
) -> Result<DecodeSummary> {
    HuffmanDecoder::new(*config).decode(reader, writer)
}
