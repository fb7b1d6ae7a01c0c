//! File-to-file compression and decompression.
//!
//! Compression reads the input twice: once to count byte frequencies and
//! once to pack the codes, so the input never has to fit in memory.
//! Output written before a failure is left in place.

use crate::config::CodecConfig;
use crate::decoder::HuffmanDecoder;
use crate::encoder::HuffmanEncoder;
use crate::frequency::ByteFrequencies;
use crate::packer::payload_len;
use oxihuff_core::{OxiHuffError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Report of a file compression.
#[derive(Debug, Clone)]
pub struct CompressionStats {
    /// Byte frequencies of the input.
    pub frequencies: ByteFrequencies,
    /// Input size in bytes.
    pub input_bytes: u64,
    /// Compressed size in bytes.
    pub output_bytes: u64,
    /// Meaningful payload bits.
    pub payload_bits: u32,
}

impl CompressionStats {
    /// Number of distinct byte values in the input.
    pub fn distinct_symbols(&self) -> usize {
        self.frequencies.distinct()
    }

    /// Space saved as a percentage of the input size (negative if the
    /// output grew).
    pub fn space_savings(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.output_bytes as f64 / self.input_bytes as f64) * 100.0
    }

    /// Average payload bits per input byte.
    pub fn bits_per_byte(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / self.input_bytes as f64
    }
}

/// Report of a file decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressionStats {
    /// Compressed input size in bytes.
    pub input_bytes: u64,
    /// Decompressed size in bytes.
    pub output_bytes: u64,
    /// Payload bits decoded.
    pub payload_bits: u64,
}

fn open_input(path: &Path, config: &CodecConfig) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| OxiHuffError::open(path, e))?;
    Ok(BufReader::with_capacity(config.buffer_size, file))
}

fn create_output(path: &Path, config: &CodecConfig) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| OxiHuffError::open(path, e))?;
    Ok(BufWriter::with_capacity(config.buffer_size, file))
}

/// Compress the file at `input` into `output`.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<CompressionStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    log::debug!("compressing {} -> {}", input.display(), output.display());

    let frequencies = ByteFrequencies::from_reader(open_input(input, config)?)?;
    let encoder = HuffmanEncoder::new(&frequencies)?;

    let mut writer = create_output(output, config)?;
    let header_len = encoder.write_header(&mut writer)?;

    let reader = open_input(input, config)?;
    let mut writer = encoder.pack_reader(reader, writer, config.buffer_size)?;
    writer.flush()?;

    let stats = CompressionStats {
        input_bytes: frequencies.total(),
        output_bytes: header_len + payload_len(encoder.total_bits()),
        payload_bits: encoder.total_bits(),
        frequencies,
    };
    log::debug!(
        "compressed {} -> {} bytes ({:.1}% saved)",
        stats.input_bytes,
        stats.output_bytes,
        stats.space_savings()
    );
    Ok(stats)
}

/// Decompress the file at `input` into `output`.
///
/// Corruption is reported as an error; the partially written output is not
/// removed.
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<DecompressionStats> {
    let (input, output) = (input.as_ref(), output.as_ref());
    log::debug!("decompressing {} -> {}", input.display(), output.display());

    let reader = open_input(input, config)?;
    let input_bytes = fs::metadata(input)?.len();
    let mut writer = create_output(output, config)?;

    let summary = HuffmanDecoder::new(*config).decode(reader, &mut writer)?;
    writer.flush()?;

    log::debug!(
        "decompressed {} -> {} bytes",
        input_bytes,
        summary.bytes_written
    );
    Ok(DecompressionStats {
        input_bytes,
        output_bytes: summary.bytes_written,
        payload_bits: summary.payload_bits,
    })
}
