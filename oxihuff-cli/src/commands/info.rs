//! Info command implementation.

use oxihuff_huffman::{StreamInfo, inspect};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON serializable stream summary.
#[derive(Debug, Serialize, Deserialize)]
struct StreamInfoJson {
    file: String,
    size: u64,
    symbols: usize,
    max_code_len: usize,
    header_bytes: u64,
    payload_bits: u32,
    payload_bytes: u64,
    trailing_bytes: u64,
    complete: bool,
}

impl StreamInfoJson {
    fn new(path: &Path, info: &StreamInfo) -> Self {
        Self {
            file: path.display().to_string(),
            size: info.total_len(),
            symbols: info.symbols,
            max_code_len: info.max_code_len,
            header_bytes: info.header_len(),
            payload_bits: info.payload_bits,
            payload_bytes: info.payload_len,
            trailing_bytes: info.trailing_len(),
            complete: info.is_complete(),
        }
    }
}

pub fn cmd_info(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let info = inspect(BufReader::new(file))?;

    if json {
        let out = StreamInfoJson::new(path, &info);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", path.display());
    println!("Size: {} bytes", info.total_len());
    println!();
    println!("Code:");
    println!("  Symbols: {}", info.symbols);
    println!("  Longest code: {} bits", info.max_code_len);
    println!("  Header: {} bytes", info.header_len());
    println!();
    println!("Payload:");
    println!("  Bits: {}", info.payload_bits);
    println!("  Bytes: {} needed, {} present", info.payload_len, info.stored_len);
    if info.trailing_len() > 0 {
        println!("  Trailing bytes (ignored): {}", info.trailing_len());
    }
    if !info.is_complete() {
        println!("  WARNING: payload is truncated");
    }
    Ok(())
}
