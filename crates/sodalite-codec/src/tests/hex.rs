// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::error::CodecError;
use crate::hex::{bin2hex, bin2hex_into, hex2bin, hex2bin_prefix};
use crate::types::Decoded;

// =============================================================================
// bin2hex()
// =============================================================================

#[test]
fn test_bin2hex_all_nibbles() {
    let bin: Vec<u8> = (0..=255).collect();
    let hex = bin2hex(&bin);

    assert_eq!(hex.len(), 512);
    assert_eq!(&hex[..8], "00010203");
    assert_eq!(&hex[0x0a * 2..0x10 * 2], "0a0b0c0d0e0f");
    assert_eq!(&hex[508..], "feff");
}

#[test]
fn test_bin2hex_into_exact_buffer() {
    let mut out = [0u8; 4];
    let written = bin2hex_into(&[0xAB, 0x01], &mut out).expect("Failed to bin2hex_into(..)");

    assert_eq!(written, 4);
    assert_eq!(&out, b"ab01");
}

#[test]
fn test_bin2hex_into_buffer_too_small() {
    let mut out = [0u8; 3];
    assert_eq!(bin2hex_into(&[0xAB, 0x01], &mut out), Err(CodecError::BufferTooSmall));
}

// =============================================================================
// hex2bin()
// =============================================================================

#[test]
fn test_hex2bin_with_spaces() {
    let mut bin = [0u8; 4];
    let decoded = hex2bin("de ad be ef", " ", &mut bin).expect("Failed to hex2bin(..)");

    assert_eq!(bin, [0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(decoded, Decoded { len: 4, consumed: 11 });
}

#[test]
fn test_hex2bin_mixed_case() {
    let mut bin = [0u8; 3];
    hex2bin("aBcDeF", "", &mut bin).expect("Failed to hex2bin(..)");
    assert_eq!(bin, [0xAB, 0xCD, 0xEF]);
}

#[test]
fn test_hex2bin_empty_input() {
    let mut bin = [0u8; 0];
    let decoded = hex2bin("", "", &mut bin).expect("Failed to hex2bin(..)");
    assert_eq!(decoded, Decoded::default());
}

#[test]
fn test_hex2bin_rejects_separator_inside_byte() {
    let mut bin = [0u8; 2];
    assert_eq!(hex2bin("d e", " ", &mut bin), Err(CodecError::Decode));
}

#[test]
fn test_hex2bin_rejects_invalid_digit() {
    let mut bin = [0u8; 2];
    assert_eq!(hex2bin("zz", "", &mut bin), Err(CodecError::Decode));
    assert_eq!(hex2bin("0g", "", &mut bin), Err(CodecError::Decode));
    // Characters adjacent to the digit ranges
    for c in [b'/', b':', b'@', b'G', b'`', b'g'] {
        assert_eq!(hex2bin([b'0', c], "", &mut bin), Err(CodecError::Decode));
    }
}

#[test]
fn test_hex2bin_rejects_odd_length() {
    let mut bin = [0u8; 2];
    assert_eq!(hex2bin("abc", "", &mut bin), Err(CodecError::Decode));
}

#[test]
fn test_hex2bin_rejects_trailing_garbage() {
    let mut bin = [0u8; 4];
    assert_eq!(hex2bin("abcd!", "", &mut bin), Err(CodecError::Decode));
}

#[test]
fn test_hex2bin_buffer_too_small() {
    let mut bin = [0u8; 1];
    assert_eq!(hex2bin("abcd", "", &mut bin), Err(CodecError::BufferTooSmall));
}

#[test]
fn test_hex2bin_wipes_partial_output_on_error() {
    let mut bin = [0u8; 4];
    assert_eq!(hex2bin("a1b2c3!", "", &mut bin), Err(CodecError::Decode));
    assert_eq!(bin, [0u8; 4]);

    let mut small = [0u8; 2];
    assert_eq!(hex2bin("a1b2c3", "", &mut small), Err(CodecError::BufferTooSmall));
    assert_eq!(small, [0u8; 2]);
}

// =============================================================================
// hex2bin_prefix()
// =============================================================================

#[test]
fn test_hex2bin_prefix_reports_consumed() {
    let mut bin = [0u8; 4];
    let decoded = hex2bin_prefix("0102 03xyz", " ", &mut bin).expect("Failed to hex2bin_prefix(..)");

    assert_eq!(decoded, Decoded { len: 3, consumed: 7 });
    assert_eq!(&bin[..3], &[1, 2, 3]);
}

#[test]
fn test_hex2bin_prefix_odd_digit_before_stop_is_error() {
    let mut bin = [0u8; 4];
    assert_eq!(hex2bin_prefix("abc;", "", &mut bin), Err(CodecError::Decode));
}

proptest! {
    #[test]
    fn prop_hex_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let hex = bin2hex(&data);
        prop_assert_eq!(hex.len(), data.len() * 2);

        let mut bin = vec![0u8; data.len()];
        let decoded = hex2bin(&hex, "", &mut bin).expect("Failed to hex2bin(..)");

        prop_assert_eq!(decoded.consumed, hex.len());
        prop_assert_eq!(bin, data);
    }

    #[test]
    fn prop_hex2bin_uppercase_matches_lowercase(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let upper = bin2hex(&data).to_uppercase();
        let mut bin = vec![0u8; data.len()];

        hex2bin(&upper, "", &mut bin).expect("Failed to hex2bin(..)");
        prop_assert_eq!(bin, data);
    }
}
