//! Byte frequency analysis.
//!
//! The input is treated as opaque bytes; every value 0-255 gets a counter and
//! only the values that actually occur are reported.

use oxihuff_core::{OxiHuffError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Occurrence count for every byte value of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteFrequencies {
    counts: [u64; 256],
}

impl ByteFrequencies {
    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut freqs = Self { counts: [0; 256] };
        freqs.add(data);
        freqs
    }

    /// Count every byte produced by `reader` until it is exhausted.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut freqs = Self { counts: [0; 256] };
        let mut buffer = vec![0u8; 32 * 1024];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            freqs.add(&buffer[..n]);
        }

        Ok(freqs)
    }

    /// Count the bytes of the file at `path`.
    ///
    /// Fails with [`OxiHuffError::Open`] if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| OxiHuffError::open(path, e))?;
        Self::from_reader(BufReader::new(file))
    }

    fn add(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Occurrence count of `byte` (zero if it never occurs).
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Distinct bytes with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether no bytes were counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}
