//! OxiHuff CLI - static Huffman file compressor
//!
//! Compresses one file into one self-describing Huffman stream and back.

mod commands;
mod utils;

use clap::{Args, Parser, Subcommand};
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_test};
use oxihuff_huffman::CodecConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "Static Huffman file compressor - Pure Rust"
)]
#[command(long_about = "
OxiHuff compresses a file with a static Huffman code derived from its byte
frequencies. The code tree is stored in front of the packed bits, so every
compressed file can be decoded on its own.

Examples:
  oxihuff compress notes.txt notes.ohf
  oxihuff -c notes.txt notes.ohf
  oxihuff decompress notes.ohf notes.txt
  oxihuff -d notes.ohf notes.txt
  oxihuff info notes.ohf --json
  oxihuff test notes.ohf other.ohf
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c", short_flag = 'c')]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Compressed output file
        output: PathBuf,

        /// Print the byte frequency table and code statistics
        #[arg(short, long)]
        verbose: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decompress a file
    #[command(alias = "d", short_flag = 'd')]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Decompressed output file
        output: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Show information about a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Test compressed file integrity
    #[command(alias = "t")]
    Test {
        /// Compressed files to test
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

/// Codec tuning shared by the commands that run the codec.
#[derive(Args, Debug, Clone, Copy)]
struct CodecArgs {
    /// I/O buffer size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = CodecConfig::DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Refuse to decompress more than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_output: Option<u64>,
}

impl CodecArgs {
    fn config(&self) -> CodecConfig {
        CodecConfig::new()
            .with_buffer_size(self.buffer_size)
            .with_max_output_size(self.max_output)
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            verbose,
            progress,
            codec,
        } => cmd_compress(&input, &output, &codec.config(), verbose, progress),
        Commands::Decompress {
            input,
            output,
            verbose,
            progress,
            codec,
        } => cmd_decompress(&input, &output, &codec.config(), verbose, progress),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Test {
            files,
            verbose,
            codec,
        } => cmd_test(&files, &codec.config(), verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
