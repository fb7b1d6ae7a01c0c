//! Huffman codec integration tests.

use oxihuff_huffman::tree_codec::{deserialize_tree, serialize_tree};
use oxihuff_huffman::{
    ByteFrequencies, CodeTable, CodecConfig, HuffmanTree, OxiHuffError, compress, compress_file,
    decompress, decompress_file, decompress_stream, inspect,
};
use std::fs;
use std::path::PathBuf;

/// Reproducible pseudo-random bytes drawn from `alphabet` distinct values.
fn pseudo_random(len: usize, alphabet: u32, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as u32 % alphabet) as u8
        })
        .collect()
}

fn sample_inputs() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        vec![0],
        vec![0xFF; 7],
        vec![b'z'; 4096],
        b"aaab".to_vec(),
        b"ab".to_vec(),
        b"TOBEORNOTTOBEORTOBEORNOT".to_vec(),
        b"The quick brown fox jumps over the lazy dog. ".repeat(50),
        (0..=255).collect(),
        (0..=255u8).rev().cycle().take(3000).collect(),
        pseudo_random(10_000, 3, 1),
        pseudo_random(10_000, 256, 2),
        pseudo_random(777, 40, 3),
    ]
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("oxihuff_integration_{}", name))
}

#[test]
fn test_roundtrip_all_samples() {
    for input in sample_inputs() {
        let compressed = compress(&input).expect("compression failed");
        let decompressed = decompress(&compressed).expect("decompression failed");
        assert_eq!(decompressed, input, "round trip failed for {} bytes", input.len());
    }
}

#[test]
fn test_codes_are_prefix_free() {
    for input in sample_inputs() {
        let freqs = ByteFrequencies::from_bytes(&input);
        if freqs.distinct() < 2 {
            continue;
        }
        let table = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        assert_eq!(table.len(), freqs.distinct());

        let codes: Vec<_> = table.iter().map(|(_, code)| *code).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a), "{} / {}", a, b);
            }
        }
    }
}

#[test]
fn test_kraft_equality() {
    // A full binary tree uses the whole code space.
    let freqs = ByteFrequencies::from_bytes(&pseudo_random(5000, 100, 9));
    let table = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
    let max = table.iter().map(|(_, c)| c.len()).max().unwrap();
    let sum: u128 = table.iter().map(|(_, c)| 1u128 << (max - c.len())).sum();
    assert_eq!(sum, 1u128 << max);
}

#[test]
fn test_tree_serialization_roundtrip() {
    for input in sample_inputs() {
        let Some(tree) = HuffmanTree::build(&ByteFrequencies::from_bytes(&input)) else {
            continue;
        };
        let bytes = serialize_tree(Some(&tree));
        let (decoded, used) = deserialize_tree(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert!(tree.same_structure(&decoded.unwrap()));
    }
}

#[test]
fn test_bit_count_exactness() {
    for input in sample_inputs() {
        let compressed = compress(&input).unwrap();
        let info = inspect(compressed.as_slice()).unwrap();

        let mut out = Vec::new();
        let summary =
            decompress_stream(compressed.as_slice(), &mut out, &CodecConfig::default()).unwrap();
        assert_eq!(summary.payload_bits, info.payload_bits as u64);
        assert_eq!(info.payload_len, info.stored_len);
    }
}

#[test]
fn test_degenerate_repeated_byte() {
    for n in [1usize, 7, 8, 9, 1000] {
        let input = vec![0x42; n];
        let compressed = compress(&input).unwrap();
        assert_eq!(compressed.len(), 2 + 4 + n.div_ceil(8));
        assert_eq!(decompress(&compressed).unwrap(), input);
    }
}

#[test]
fn test_truncated_payload_is_corruption() {
    for input in sample_inputs() {
        if input.is_empty() {
            continue;
        }
        let compressed = compress(&input).unwrap();
        let err = decompress(&compressed[..compressed.len() - 1]).unwrap_err();
        assert!(err.is_corruption(), "expected corruption, got {:?}", err);
    }
}

#[test]
fn test_trailing_garbage_is_ignored() {
    let input = b"trailing bytes after the payload".to_vec();
    let mut compressed = compress(&input).unwrap();
    compressed.extend_from_slice(b"garbage");
    assert_eq!(decompress(&compressed).unwrap(), input);
}

#[test]
fn test_inflated_bit_count_is_corruption() {
    let input = b"bit count larger than the payload".to_vec();
    let mut compressed = compress(&input).unwrap();
    let info = inspect(compressed.as_slice()).unwrap();
    let at = info.tree_len as usize;
    let bumped = info.payload_bits + 64;
    compressed[at..at + 4].copy_from_slice(&bumped.to_be_bytes());

    let err = decompress(&compressed).unwrap_err();
    assert!(err.is_corruption());
}

#[test]
fn test_bad_marker_is_corruption() {
    let err = decompress(&[0x05, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, OxiHuffError::InvalidMarker { marker: 0x05, offset: 0 }));
}

#[test]
fn test_aaab_example() {
    let freqs = ByteFrequencies::from_bytes(b"aaab");
    assert_eq!(freqs.iter().collect::<Vec<_>>(), vec![(b'a', 3), (b'b', 1)]);

    let table = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
    assert!(table.get(b'a').unwrap().len() <= table.get(b'b').unwrap().len());

    let compressed = compress(b"aaab").unwrap();
    assert_eq!(decompress(&compressed).unwrap(), b"aaab");
}

#[test]
fn test_file_roundtrip_and_truncation() {
    let input = temp_path("file_input.bin");
    let packed = temp_path("file_input.ohf");
    let restored = temp_path("file_input.out");
    let data = pseudo_random(200_000, 17, 5);
    fs::write(&input, &data).unwrap();

    let config = CodecConfig::default().with_buffer_size(4096);
    compress_file(&input, &packed, &config).unwrap();
    assert_eq!(fs::read(&packed).unwrap(), compress(&data).unwrap());

    decompress_file(&packed, &restored, &config).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);

    let mut truncated = fs::read(&packed).unwrap();
    truncated.pop();
    fs::write(&packed, &truncated).unwrap();
    let err = decompress_file(&packed, &restored, &config).unwrap_err();
    assert!(err.is_corruption());

    for path in [input, packed, restored] {
        let _ = fs::remove_file(path);
    }
}

#[test]
fn test_empty_file_roundtrip() {
    let input = temp_path("empty_input");
    let packed = temp_path("empty_input.ohf");
    let restored = temp_path("empty_input.out");
    fs::write(&input, b"").unwrap();

    let stats = compress_file(&input, &packed, &CodecConfig::default()).unwrap();
    assert_eq!(stats.output_bytes, 5);
    decompress_file(&packed, &restored, &CodecConfig::default()).unwrap();
    assert!(fs::read(&restored).unwrap().is_empty());

    for path in [input, packed, restored] {
        let _ = fs::remove_file(path);
    }
}
