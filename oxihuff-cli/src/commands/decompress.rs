//! Decompress command implementation.

use crate::utils::{create_spinner, format_size};
use oxihuff_huffman::{CodecConfig, decompress_file};
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: &Path,
    config: &CodecConfig,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Decompressing {} -> {}", input.display(), output.display());
    }

    let pb = create_spinner(format!("Decompressing {}", input.display()), progress);
    let result = decompress_file(input, output, config);
    pb.finish_and_clear();
    let stats = result?;

    if verbose {
        println!("Payload bits: {}", stats.payload_bits);
    }

    println!(
        "Decompressed {}: {} -> {}",
        input.display(),
        format_size(stats.input_bytes),
        format_size(stats.output_bytes)
    );
    Ok(())
}
