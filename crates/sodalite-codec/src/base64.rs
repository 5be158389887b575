// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Base64 encoding and decoding (RFC 4648), standard and URL-safe alphabets.
//!
//! Output is bit-exact with libsodium's `sodium_bin2base64` / `sodium_base642bin`,
//! including the accepted padding forms and the rejection of non-zero trailing
//! bits.

use alloc::string::String;

use sodalite_zero::{memzero, zeroize_primitive};

use crate::ct::{eq, ge, le, lt};
use crate::error::CodecError;
use crate::types::{Base64Variant, Decoded};

// =============================================================================
// Alphabets
// =============================================================================

#[inline(always)]
fn byte_to_char(x: u32) -> u8 {
    ((lt(x, 26) & (x.wrapping_add(b'A' as u32)))
        | (ge(x, 26) & lt(x, 52) & (x.wrapping_add(b'a' as u32 - 26)))
        | (ge(x, 52) & lt(x, 62) & (x.wrapping_sub(52 - b'0' as u32)))
        | (eq(x, 62) & b'+' as u32)
        | (eq(x, 63) & b'/' as u32)) as u8
}

#[inline(always)]
fn urlsafe_byte_to_char(x: u32) -> u8 {
    ((lt(x, 26) & (x.wrapping_add(b'A' as u32)))
        | (ge(x, 26) & lt(x, 52) & (x.wrapping_add(b'a' as u32 - 26)))
        | (ge(x, 52) & lt(x, 62) & (x.wrapping_sub(52 - b'0' as u32)))
        | (eq(x, 62) & b'-' as u32)
        | (eq(x, 63) & b'_' as u32)) as u8
}

/// Returns the 6-bit value of `c`, or `0xFF` if `c` is not in the alphabet.
#[inline(always)]
fn char_to_byte(c: u32) -> u32 {
    let x = (ge(c, b'A' as u32) & le(c, b'Z' as u32) & c.wrapping_sub(b'A' as u32))
        | (ge(c, b'a' as u32) & le(c, b'z' as u32) & c.wrapping_sub(b'a' as u32 - 26))
        | (ge(c, b'0' as u32) & le(c, b'9' as u32) & c.wrapping_add(52 - b'0' as u32))
        | (eq(c, b'+' as u32) & 62)
        | (eq(c, b'/' as u32) & 63);

    x | (eq(x, 0) & (eq(c, b'A' as u32) ^ 0xFF))
}

#[inline(always)]
fn urlsafe_char_to_byte(c: u32) -> u32 {
    let x = (ge(c, b'A' as u32) & le(c, b'Z' as u32) & c.wrapping_sub(b'A' as u32))
        | (ge(c, b'a' as u32) & le(c, b'z' as u32) & c.wrapping_sub(b'a' as u32 - 26))
        | (ge(c, b'0' as u32) & le(c, b'9' as u32) & c.wrapping_add(52 - b'0' as u32))
        | (eq(c, b'-' as u32) & 62)
        | (eq(c, b'_' as u32) & 63);

    x | (eq(x, 0) & (eq(c, b'A' as u32) ^ 0xFF))
}

// =============================================================================
// Encoding
// =============================================================================

/// Exact size of the encoding of `bin_len` bytes, including one byte for a NUL
/// terminator (libsodium's `sodium_base64_ENCODED_LEN`).
///
/// Padded variants round up to a multiple of 4 characters; unpadded variants
/// emit `ceil(8 * bin_len / 6)` characters.
///
/// # Panics
///
/// Overflows (and panics in debug builds) for `bin_len` above `usize::MAX / 4 * 3`.
///
/// # Example
///
/// ```
/// use sodalite_codec::{Base64Variant, base64_encoded_len};
///
/// assert_eq!(base64_encoded_len(0, Base64Variant::Original), 1);
/// assert_eq!(base64_encoded_len(1, Base64Variant::Original), 5);
/// assert_eq!(base64_encoded_len(1, Base64Variant::OriginalNoPadding), 3);
/// assert_eq!(base64_encoded_len(2, Base64Variant::UrlSafeNoPadding), 4);
/// assert_eq!(base64_encoded_len(3, Base64Variant::UrlSafe), 5);
/// ```
pub const fn base64_encoded_len(bin_len: usize, variant: Base64Variant) -> usize {
    let remainder = bin_len % 3;
    let tail = if remainder == 0 {
        0
    } else if variant.is_padded() {
        4
    } else {
        remainder + 1
    };

    (bin_len / 3) * 4 + tail + 1
}

/// Encoded length without the terminator, or `None` if it does not fit a `usize`.
fn encoded_len_checked(bin_len: usize, variant: Base64Variant) -> Option<usize> {
    let remainder = bin_len % 3;
    let tail = match (remainder, variant.is_padded()) {
        (0, _) => 0,
        (_, true) => 4,
        (r, false) => r + 1,
    };

    (bin_len / 3).checked_mul(4)?.checked_add(tail)
}

/// Encodes `bin` with the alphabet and padding of `variant`.
///
/// # Example
///
/// ```
/// use sodalite_codec::{Base64Variant, bin2base64};
///
/// assert_eq!(bin2base64(b"\xfb\xff", Base64Variant::Original), "+/8=");
/// assert_eq!(bin2base64(b"\xfb\xff", Base64Variant::UrlSafeNoPadding), "-_8");
/// ```
pub fn bin2base64(bin: &[u8], variant: Base64Variant) -> String {
    let mut b64 = String::with_capacity(base64_encoded_len(bin.len(), variant) - 1);
    encode(bin, variant, |c| b64.push(c as char));

    b64
}

/// Encodes `bin` into `out`, returning the number of characters written
/// (the result of [`base64_encoded_len`] minus the terminator).
///
/// Fails with [`CodecError::BufferTooSmall`] if `out` is too short.
pub fn bin2base64_into(bin: &[u8], out: &mut [u8], variant: Base64Variant) -> Result<usize, CodecError> {
    let b64_len = encoded_len_checked(bin.len(), variant).ok_or(CodecError::BufferTooSmall)?;

    if out.len() < b64_len {
        return Err(CodecError::BufferTooSmall);
    }

    let mut pos = 0usize;
    encode(bin, variant, |c| {
        out[pos] = c;
        pos += 1;
    });

    Ok(b64_len)
}

fn encode(bin: &[u8], variant: Base64Variant, mut emit: impl FnMut(u8)) {
    let to_char: fn(u32) -> u8 = if variant.is_url_safe() {
        urlsafe_byte_to_char
    } else {
        byte_to_char
    };

    let mut acc = 0u32;
    let mut acc_len = 0u32;
    let mut written = 0usize;

    for &b in bin {
        acc = (acc << 8) + b as u32;
        acc_len += 8;

        while acc_len >= 6 {
            acc_len -= 6;
            emit(to_char((acc >> acc_len) & 0x3F));
            written += 1;
        }
    }

    if acc_len > 0 {
        emit(to_char((acc << (6 - acc_len)) & 0x3F));
        written += 1;
    }

    if variant.is_padded() {
        while written % 4 != 0 {
            emit(b'=');
            written += 1;
        }
    }

    zeroize_primitive(&mut acc);
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes base64 in the alphabet of `variant` into `bin`, skipping characters
/// in `ignore`.
///
/// Strict: a character that is neither in the alphabet nor in `ignore` is a
/// [`CodecError::Decode`]. Also rejected: more than 4 leftover bits, non-zero
/// leftover bits, and, for padded variants, missing or malformed `=` padding.
/// Ignored characters may appear between padding characters and after the
/// input. `bin.len()` is the output capacity; exceeding it is
/// [`CodecError::BufferTooSmall`]. On error, bytes already written are wiped.
///
/// # Example
///
/// ```
/// use sodalite_codec::{Base64Variant, base642bin};
///
/// let mut bin = [0u8; 16];
/// let decoded = base642bin("SGVs\nbG8=\n", "\n", &mut bin, Base64Variant::Original)?;
///
/// assert_eq!(&bin[..decoded.len], b"Hello");
/// assert_eq!(decoded.consumed, 10);
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn base642bin(
    b64: impl AsRef<[u8]>,
    ignore: impl AsRef<[u8]>,
    bin: &mut [u8],
    variant: Base64Variant,
) -> Result<Decoded, CodecError> {
    decode(b64.as_ref(), ignore.as_ref(), bin, variant, true)
}

/// Like [`base642bin`], but stops at the first character that is neither in the
/// alphabet nor in `ignore` and reports how much input was consumed.
///
/// # Example
///
/// ```
/// use sodalite_codec::{Base64Variant, base642bin_prefix};
///
/// let mut bin = [0u8; 8];
/// let decoded = base642bin_prefix("QUJD.sig", "", &mut bin, Base64Variant::UrlSafe)?;
///
/// assert_eq!(&bin[..decoded.len], b"ABC");
/// assert_eq!(decoded.consumed, 4);
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn base642bin_prefix(
    b64: impl AsRef<[u8]>,
    ignore: impl AsRef<[u8]>,
    bin: &mut [u8],
    variant: Base64Variant,
) -> Result<Decoded, CodecError> {
    decode(b64.as_ref(), ignore.as_ref(), bin, variant, false)
}

fn decode(
    b64: &[u8],
    ignore: &[u8],
    bin: &mut [u8],
    variant: Base64Variant,
    strict: bool,
) -> Result<Decoded, CodecError> {
    let to_byte: fn(u32) -> u32 = if variant.is_url_safe() {
        urlsafe_char_to_byte
    } else {
        char_to_byte
    };

    let mut acc = 0u32;
    let mut acc_len = 0u32;
    let mut bin_pos = 0usize;
    let mut b64_pos = 0usize;
    let mut result = Ok(());

    while b64_pos < b64.len() {
        let c = b64[b64_pos];
        let d = to_byte(c as u32);

        if d == 0xFF {
            if ignore.contains(&c) {
                b64_pos += 1;
                continue;
            }
            break;
        }

        acc = (acc << 6) + d;
        acc_len += 6;

        if acc_len >= 8 {
            acc_len -= 8;

            if bin_pos >= bin.len() {
                result = Err(CodecError::BufferTooSmall);
                break;
            }

            bin[bin_pos] = (acc >> acc_len) as u8;
            bin_pos += 1;
        }

        b64_pos += 1;
    }

    if result.is_ok() && (acc_len > 4 || (acc & ((1u32 << acc_len) - 1)) != 0) {
        result = Err(CodecError::Decode);
    }

    if result.is_ok() && variant.is_padded() {
        result = skip_padding(b64, &mut b64_pos, ignore, acc_len / 2);
    }

    zeroize_primitive(&mut acc);

    if result.is_ok() {
        while b64_pos < b64.len() && ignore.contains(&b64[b64_pos]) {
            b64_pos += 1;
        }

        if strict && b64_pos != b64.len() {
            result = Err(CodecError::Decode);
        }
    }

    if let Err(e) = result {
        memzero(&mut bin[..bin_pos]);
        return Err(e);
    }

    Ok(Decoded {
        len: bin_pos,
        consumed: b64_pos,
    })
}

/// Consumes exactly `padding_len` `=` characters, allowing ignored characters
/// in between.
fn skip_padding(
    b64: &[u8],
    b64_pos: &mut usize,
    ignore: &[u8],
    mut padding_len: u32,
) -> Result<(), CodecError> {
    while padding_len > 0 {
        let Some(&c) = b64.get(*b64_pos) else {
            return Err(CodecError::Decode);
        };

        if c == b'=' {
            padding_len -= 1;
        } else if !ignore.contains(&c) {
            return Err(CodecError::Decode);
        }

        *b64_pos += 1;
    }

    Ok(())
}
