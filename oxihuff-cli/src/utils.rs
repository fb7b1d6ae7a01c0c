//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxihuff_huffman::ByteFrequencies;
use std::time::Duration;

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("spinner template is valid"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Display form of a byte: the character itself when printable.
pub fn byte_label(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("0x{:02X} '{}'", byte, byte as char)
    } else {
        format!("0x{:02X}", byte)
    }
}

/// Print the byte frequency table, one line per occurring byte.
pub fn print_frequencies(frequencies: &ByteFrequencies) {
    println!("{:<10} {:>12} {:>7}", "Byte", "Count", "Share");
    println!("{}", "-".repeat(31));

    let total = frequencies.total();
    for (byte, count) in frequencies.iter() {
        println!(
            "{:<10} {:>12} {:>6.2}%",
            byte_label(byte),
            count,
            count as f64 / total as f64 * 100.0
        );
    }

    println!("{}", "-".repeat(31));
    println!("{:<10} {:>12}", "Total", total);
}

/// Format a size in bytes with a binary unit.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_label() {
        assert_eq!(byte_label(b'a'), "0x61 'a'");
        assert_eq!(byte_label(b' '), "0x20 ' '");
        assert_eq!(byte_label(0x0A), "0x0A");
        assert_eq!(byte_label(0xFF), "0xFF");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
