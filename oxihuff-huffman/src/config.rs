//! Codec configuration.

/// Huffman codec configuration parameters.
///
/// None of these settings change the stream format; they tune the file
/// pipeline and guard decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Capacity of the buffered reader/writer used by the file pipeline.
    pub buffer_size: usize,
    /// Largest decoded output accepted by decompression (`None` = no limit).
    pub max_output_size: Option<u64>,
}

impl CodecConfig {
    /// Default buffer capacity (64 KiB).
    pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

    /// Smallest buffer capacity accepted by [`CodecConfig::with_buffer_size`].
    pub const MIN_BUFFER_SIZE: usize = 512;

    /// Default configuration: 64 KiB buffers, unlimited output.
    pub const DEFAULT: Self = Self {
        buffer_size: Self::DEFAULT_BUFFER_SIZE,
        max_output_size: None,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the buffer capacity, clamped to at least [`Self::MIN_BUFFER_SIZE`].
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(Self::MIN_BUFFER_SIZE);
        self
    }

    /// Limit the size of decompressed output.
    pub fn with_max_output_size(mut self, limit: Option<u64>) -> Self {
        self.max_output_size = limit;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
