//! Integration tests for the configurable LZSS codec.

use vnarc_core::bitstream::BitOrder;
use vnarc_core::error::VnArcError;
use vnarc_lzss::{LzssConfig, LzssDecoder, LzssEncoder, LzssToken, decode, encode, write_tokens};

/// Deterministic pseudo-random bytes (LCG).
fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 16) as u8
        })
        .collect()
}

fn assert_roundtrip(data: &[u8], config: &LzssConfig) {
    let compressed = encode(data, config).expect("encode failed");
    let decompressed = decode(&compressed, config).expect("decode failed");
    assert_eq!(decompressed, data, "roundtrip mismatch for {:?}", config);
}

// ============================================================================
// Known Streams
// ============================================================================

#[test]
fn test_nsa_known_stream_abab() {
    let compressed = encode(b"ABABAB", &LzssConfig::NSA).unwrap();
    assert_eq!(compressed, [0xA0, 0xD0, 0x9D, 0xE4]);
    assert_eq!(decode(&compressed, &LzssConfig::NSA).unwrap(), b"ABABAB");
}

#[test]
fn test_nsa_known_stream_zeros() {
    let compressed = encode(&[0u8; 20], &LzssConfig::NSA).unwrap();
    assert_eq!(compressed, [0x77, 0x7B, 0xFC, 0x40]);
    assert_eq!(decode(&compressed, &LzssConfig::NSA).unwrap(), [0u8; 20]);
}

#[test]
fn test_padding_never_decodes_as_token() {
    // One literal leaves 7 padding bits, not enough for a literal (9) or a
    // reference (13)
    let data = decode(&[0xA0, 0x80], &LzssConfig::NSA).unwrap();
    assert_eq!(data, b"A");

    // Padding made of ones is not enough either
    let data = decode(&[0xA0, 0xFF], &LzssConfig::NSA).unwrap();
    assert_eq!(data, b"A");
}

// ============================================================================
// Roundtrips
// ============================================================================

#[test]
fn test_roundtrip_empty() {
    let compressed = encode(&[], &LzssConfig::NSA).unwrap();
    assert!(compressed.is_empty());
    assert!(decode(&compressed, &LzssConfig::NSA).unwrap().is_empty());
}

#[test]
fn test_roundtrip_short() {
    for data in [&b"a"[..], b"ab", b"abc", b"\x00", b"\xFF\xFF"] {
        assert_roundtrip(data, &LzssConfig::NSA);
    }
}

#[test]
fn test_roundtrip_text() {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 The quick brown fox jumps over the lazy dog again. \
                 ;; NScripter script line\n*label\nbg \"image.bmp\",1\n";
    let compressed = encode(text, &LzssConfig::NSA).unwrap();
    assert!(compressed.len() < text.len());
    assert_eq!(decode(&compressed, &LzssConfig::NSA).unwrap(), text);
}

#[test]
fn test_roundtrip_all_zero_large() {
    let data = vec![0u8; 10_000];
    let compressed = encode(&data, &LzssConfig::NSA).unwrap();
    // Every token copies 17 bytes in 13 bits
    assert!(compressed.len() < data.len() / 8);
    assert_eq!(decode(&compressed, &LzssConfig::NSA).unwrap(), data);
}

#[test]
fn test_roundtrip_pseudo_random() {
    for (len, seed) in [(1, 1), (255, 7), (256, 42), (257, 99), (5000, 2024)] {
        assert_roundtrip(&pseudo_random(len, seed), &LzssConfig::NSA);
    }
}

#[test]
fn test_roundtrip_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
    assert_roundtrip(&data, &LzssConfig::NSA);
}

#[test]
fn test_roundtrip_wraps_window_many_times() {
    let mut data = Vec::new();
    for i in 0..200u32 {
        data.extend_from_slice(format!("line {} of the script\n", i % 17).as_bytes());
    }
    assert_roundtrip(&data, &LzssConfig::NSA);
}

// ============================================================================
// Alternative Configurations
// ============================================================================

#[test]
fn test_roundtrip_lsb_first() {
    let config = LzssConfig::NSA.with_bit_order(BitOrder::LsbFirst);
    assert_roundtrip(b"ABABABABAB hello hello", &config);
    assert_roundtrip(&pseudo_random(3000, 5), &config);

    let msb = encode(b"ABABAB", &LzssConfig::NSA).unwrap();
    let lsb = encode(b"ABABAB", &config).unwrap();
    assert_ne!(msb, lsb);
}

#[test]
fn test_roundtrip_without_reuse() {
    let config = LzssConfig::NSA.with_reuse_compressed(false);
    assert_roundtrip(&[0u8; 500], &config);
    assert_roundtrip(b"abcabcabcabcabcabcabcabc", &config);
    assert_roundtrip(&pseudo_random(2000, 11), &config);
}

#[test]
fn test_reuse_setting_changes_stream() {
    let data = b"xyxyxyxyxyxyxyxyxyxy";
    let with_reuse = encode(data, &LzssConfig::NSA).unwrap();
    let without = encode(data, &LzssConfig::NSA.with_reuse_compressed(false)).unwrap();
    assert_ne!(with_reuse, without);
    assert!(with_reuse.len() < without.len());
}

#[test]
fn test_roundtrip_inverted_literal_flag() {
    let config = LzssConfig::NSA.with_literal_flag(false);
    assert_roundtrip(b"inverted inverted inverted", &config);
}

#[test]
fn test_roundtrip_lzss_4k_window() {
    // Classic Okumura geometry: 4 KiB window, 4-bit lengths, first write at N - F
    let config = LzssConfig::new(12, 4, 3)
        .with_initial_position(4096 - 18)
        .with_fill_byte(Some(b' '));
    let mut data = Vec::new();
    for i in 0..300u32 {
        data.extend_from_slice(format!("record {:04} value {}\n", i, i * 7 % 13).as_bytes());
    }
    assert_roundtrip(&data, &config);
}

#[test]
fn test_roundtrip_empty_window() {
    let config = LzssConfig::NSA.with_fill_byte(None);
    assert_roundtrip(&[0u8; 100], &config);
    assert_roundtrip(b"abcabcabc", &config);

    // The first token can only be a literal
    let tokens = LzssEncoder::new(config).unwrap().tokenize(&[0u8; 10]);
    assert_eq!(tokens[0], LzssToken::Literal(0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_reference_to_unwritten_slot() {
    let config = LzssConfig::NSA.with_fill_byte(None);
    let stream = write_tokens(
        &[LzssToken::Match {
            position: 10,
            length: 4,
        }],
        &config,
    )
    .unwrap();

    let err = decode(&stream, &config).unwrap_err();
    assert!(matches!(
        err,
        VnArcError::InvalidReference {
            position: 10,
            output_len: 0
        }
    ));
}

#[test]
fn test_same_stream_is_valid_with_prefill() {
    let stream = write_tokens(
        &[LzssToken::Match {
            position: 10,
            length: 4,
        }],
        &LzssConfig::NSA,
    )
    .unwrap();
    assert_eq!(decode(&stream, &LzssConfig::NSA).unwrap(), [0u8; 4]);
}

#[test]
fn test_invalid_configs_rejected() {
    let bad = [
        LzssConfig::new(0, 4, 2),
        LzssConfig::new(17, 4, 2),
        LzssConfig::new(8, 0, 2),
        LzssConfig::new(8, 4, 0),
        LzssConfig::NSA.with_initial_position(300),
    ];
    for config in bad {
        assert!(matches!(
            encode(b"data", &config),
            Err(VnArcError::InvalidConfig { .. })
        ));
        assert!(matches!(
            LzssDecoder::new(config),
            Err(VnArcError::InvalidConfig { .. })
        ));
    }
}
