//! Error types for OxiHuff operations.
//!
//! Two families of failures exist: I/O failures (a path cannot be opened,
//! a read or write fails) and corruption of a compressed stream, which only
//! decompression can detect. [`OxiHuffError::is_corruption`] tells them apart.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened for the requested mode.
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Tree marker byte is neither a leaf, internal nor empty marker.
    #[error("Invalid tree marker {marker:#04x} at offset {offset}")]
    InvalidMarker {
        /// The unrecognized marker byte.
        marker: u8,
        /// Byte offset of the marker within the stream.
        offset: u64,
    },

    /// A bit sequence that no code in the tree can produce.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Payload bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Corrupted data in the compressed stream.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Stream ended before a complete structure could be read.
    #[error("Unexpected end of stream while reading {context}")]
    UnexpectedEof {
        /// What was being read when the stream ended.
        context: &'static str,
    },

    /// Encoded payload does not fit the 32-bit bit count of the format.
    #[error("Payload of {bits} bits exceeds the format limit of {limit} bits")]
    PayloadTooLarge {
        /// Number of payload bits the input would need.
        bits: u64,
        /// Largest representable bit count.
        limit: u64,
    },

    /// Input byte has no code; the input changed after its frequencies
    /// were counted.
    #[error("Byte {byte:#04x} has no Huffman code (input changed between passes?)")]
    MissingCode {
        /// The byte without a code.
        byte: u8,
    },

    /// Packed bit count differs from the count announced in the header.
    #[error("Bit count mismatch: header announced {expected} bits, packed {actual}")]
    BitCountMismatch {
        /// Bit count written to the header.
        expected: u64,
        /// Bits actually packed.
        actual: u64,
    },

    /// Decoded output would exceed the configured limit.
    #[error("Decoded output exceeds limit of {limit} bytes")]
    OutputLimitExceeded {
        /// Configured maximum output size.
        limit: u64,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an open error for `path`.
    pub fn open(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Open {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid marker error.
    pub fn invalid_marker(marker: u8, offset: u64) -> Self {
        Self::InvalidMarker { marker, offset }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(context: &'static str) -> Self {
        Self::UnexpectedEof { context }
    }

    /// Create a payload too large error.
    pub fn payload_too_large(bits: u64) -> Self {
        Self::PayloadTooLarge {
            bits,
            limit: u32::MAX as u64,
        }
    }

    /// Create a missing code error.
    pub fn missing_code(byte: u8) -> Self {
        Self::MissingCode { byte }
    }

    /// Create a bit count mismatch error.
    pub fn bit_count_mismatch(expected: u64, actual: u64) -> Self {
        Self::BitCountMismatch { expected, actual }
    }

    /// Create an output limit error.
    pub fn output_limit(limit: u64) -> Self {
        Self::OutputLimitExceeded { limit }
    }

    /// Map a read failure to [`OxiHuffError::UnexpectedEof`] when the stream
    /// simply ran out, keeping genuine I/O failures as they are.
    pub fn from_read(err: io::Error, context: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::unexpected_eof(context)
        } else {
            Self::Io(err)
        }
    }

    /// Whether this error reports a malformed compressed stream.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarker { .. }
                | Self::InvalidHuffmanCode { .. }
                | Self::CorruptedData { .. }
                | Self::UnexpectedEof { .. }
        )
    }
}
