// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Hexadecimal encoding and decoding.

use alloc::string::String;

use sodalite_zero::{memzero, zeroize_primitive};

use crate::error::CodecError;
use crate::types::Decoded;

/// Maps a nibble to its lowercase hex digit without branching on its value.
#[inline(always)]
fn nibble_to_char(v: u8) -> u8 {
    let v = v as u32;
    (87u32 + v + ((v.wrapping_sub(10) >> 8) & !38u32)) as u8
}

/// Decodes one hex digit. Returns `None` for anything outside `[0-9a-fA-F]`.
///
/// Both the digit and the letter candidates are always computed; only the
/// validity of the character, not its value, decides the branch.
#[inline(always)]
fn char_to_nibble(c: u8) -> Option<u8> {
    let c = c as u32;

    let c_num = c ^ 48;
    let c_num0 = c_num.wrapping_sub(10) >> 8;
    let c_alpha = (c & !32).wrapping_sub(55);
    let c_alpha0 = (c_alpha.wrapping_sub(10) ^ c_alpha.wrapping_sub(16)) >> 8;

    if (c_num0 | c_alpha0) == 0 {
        return None;
    }

    Some(((c_num0 & c_num) | (c_alpha0 & c_alpha)) as u8)
}

/// Encodes `bin` as lowercase hex. The result has exactly `2 * bin.len()`
/// characters.
///
/// # Example
///
/// ```
/// use sodalite_codec::bin2hex;
///
/// assert_eq!(bin2hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(bin2hex(&[]), "");
/// ```
pub fn bin2hex(bin: &[u8]) -> String {
    let mut hex = String::with_capacity(bin.len() * 2);

    for &b in bin {
        hex.push(nibble_to_char(b >> 4) as char);
        hex.push(nibble_to_char(b & 0x0F) as char);
    }

    hex
}

/// Encodes `bin` as lowercase hex into `out`, returning the number of characters
/// written (`2 * bin.len()`).
///
/// Fails with [`CodecError::BufferTooSmall`] if `out` cannot hold the encoding.
pub fn bin2hex_into(bin: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
    let hex_len = bin.len().checked_mul(2).ok_or(CodecError::BufferTooSmall)?;

    if out.len() < hex_len {
        return Err(CodecError::BufferTooSmall);
    }

    for (&b, pair) in bin.iter().zip(out.chunks_exact_mut(2)) {
        pair[0] = nibble_to_char(b >> 4);
        pair[1] = nibble_to_char(b & 0x0F);
    }

    Ok(hex_len)
}

/// Decodes case-insensitive hex into `bin`, skipping characters in `ignore`
/// between byte pairs.
///
/// Strict: any character that is neither a hex digit nor in `ignore` is a
/// [`CodecError::Decode`], as is an odd number of digits. On success the whole
/// input has been consumed. `bin.len()` is the output capacity; exceeding it is
/// [`CodecError::BufferTooSmall`]. On error, bytes already written to `bin` are
/// wiped.
///
/// # Example
///
/// ```
/// use sodalite_codec::hex2bin;
///
/// let mut bin = [0u8; 8];
/// let decoded = hex2bin("DE:AD:be:ef", ":", &mut bin)?;
///
/// assert_eq!(&bin[..decoded.len], &[0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(decoded.consumed, 11);
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn hex2bin(
    hex: impl AsRef<[u8]>,
    ignore: impl AsRef<[u8]>,
    bin: &mut [u8],
) -> Result<Decoded, CodecError> {
    decode(hex.as_ref(), ignore.as_ref(), bin, true)
}

/// Like [`hex2bin`], but stops at the first character that is neither a hex
/// digit nor in `ignore` instead of failing.
///
/// [`Decoded::consumed`] tells how much of the input was meaningful; a value
/// smaller than the input length means trailing data follows.
///
/// # Example
///
/// ```
/// use sodalite_codec::hex2bin_prefix;
///
/// let mut bin = [0u8; 4];
/// let decoded = hex2bin_prefix("cafe;trailer", "", &mut bin)?;
///
/// assert_eq!(&bin[..decoded.len], &[0xca, 0xfe]);
/// assert_eq!(decoded.consumed, 4);
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn hex2bin_prefix(
    hex: impl AsRef<[u8]>,
    ignore: impl AsRef<[u8]>,
    bin: &mut [u8],
) -> Result<Decoded, CodecError> {
    decode(hex.as_ref(), ignore.as_ref(), bin, false)
}

fn decode(hex: &[u8], ignore: &[u8], bin: &mut [u8], strict: bool) -> Result<Decoded, CodecError> {
    let mut bin_pos = 0usize;
    let mut hex_pos = 0usize;
    let mut high_nibble = true;
    let mut acc = 0u8;
    let mut result = Ok(());

    while hex_pos < hex.len() {
        let c = hex[hex_pos];

        let Some(mut val) = char_to_nibble(c) else {
            // Separators are only allowed between complete bytes.
            if high_nibble && ignore.contains(&c) {
                hex_pos += 1;
                continue;
            }
            break;
        };

        if bin_pos >= bin.len() {
            result = Err(CodecError::BufferTooSmall);
            break;
        }

        if high_nibble {
            acc = val << 4;
        } else {
            bin[bin_pos] = acc | val;
            bin_pos += 1;
        }

        zeroize_primitive(&mut val);
        high_nibble = !high_nibble;
        hex_pos += 1;
    }

    zeroize_primitive(&mut acc);

    if result.is_ok() && !high_nibble {
        result = Err(CodecError::Decode);
    }

    if result.is_ok() && strict && hex_pos != hex.len() {
        result = Err(CodecError::Decode);
    }

    if let Err(e) = result {
        memzero(&mut bin[..bin_pos]);
        return Err(e);
    }

    Ok(Decoded {
        len: bin_pos,
        consumed: hex_pos,
    })
}
