//! Compress command implementation.

use crate::utils::{create_spinner, format_size, print_frequencies};
use oxihuff_huffman::{CodecConfig, compress_file};
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: &Path,
    config: &CodecConfig,
    verbose: bool,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Compressing {} -> {}", input.display(), output.display());
    }

    let pb = create_spinner(format!("Compressing {}", input.display()), progress);
    let result = compress_file(input, output, config);
    pb.finish_and_clear();
    let stats = result?;

    if verbose {
        println!();
        print_frequencies(&stats.frequencies);
        println!();
        println!("Distinct symbols: {}", stats.distinct_symbols());
        println!("Payload bits: {}", stats.payload_bits);
        println!("Bits per byte: {:.3}", stats.bits_per_byte());
    }

    println!(
        "Compressed {}: {} -> {} ({:.1}% saved)",
        input.display(),
        format_size(stats.input_bytes),
        format_size(stats.output_bytes),
        stats.space_savings()
    );
    Ok(())
}
