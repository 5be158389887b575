// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ISO/IEC 7816-4 padding: a single `0x80` marker followed by zeros up to the
//! next block boundary.
//!
//! Both directions touch exactly one block of bytes regardless of the data, so
//! the unpadded length of a secret message does not leak through timing.

use crate::error::CodecError;

/// Pads the first `unpadded_len` bytes of `buf` to a multiple of `blocksize` and
/// returns the padded length.
///
/// At least one byte of padding is always added, so an already block-aligned
/// message grows by a full block. `buf.len()` is the maximum padded length.
///
/// Fails with [`CodecError::BufferTooSmall`] if `blocksize` is zero or the padded
/// message does not fit into `buf`.
///
/// # Example
///
/// ```
/// use sodalite_codec::pad;
///
/// let mut buf = [0u8; 16];
/// buf[..3].copy_from_slice(b"abc");
///
/// let padded_len = pad(&mut buf, 3, 8)?;
/// assert_eq!(padded_len, 8);
/// assert_eq!(&buf[..8], b"abc\x80\0\0\0\0");
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn pad(buf: &mut [u8], unpadded_len: usize, blocksize: usize) -> Result<usize, CodecError> {
    if blocksize == 0 {
        return Err(CodecError::BufferTooSmall);
    }

    let mut xpadlen = blocksize - 1;
    if blocksize.is_power_of_two() {
        xpadlen -= unpadded_len & (blocksize - 1);
    } else {
        xpadlen -= unpadded_len % blocksize;
    }

    if usize::MAX - unpadded_len <= xpadlen {
        return Err(CodecError::BufferTooSmall);
    }

    let xpadded_len = unpadded_len + xpadlen;
    if xpadded_len >= buf.len() {
        return Err(CodecError::BufferTooSmall);
    }

    // Walk the last block backwards from the tail: zeros until the marker
    // position, the marker itself, then the caller's bytes are kept as is.
    let tail = xpadded_len;
    let mut mask = 0u8;

    for i in 0..blocksize {
        let barrier_mask = ((i ^ xpadlen).wrapping_sub(1) >> (usize::BITS - 8)) as u8;
        let byte = &mut buf[tail - i];

        *byte = (*byte & mask) | (0x80 & barrier_mask);
        mask |= barrier_mask;
    }

    Ok(xpadded_len + 1)
}

/// Returns the unpadded length of an ISO/IEC 7816-4 padded message.
///
/// `padded` is the full padded message; its length must be at least one block.
/// The last block is scanned in full for the `0x80` marker preceded only by
/// zeros. Fails with [`CodecError::Decode`] if `blocksize` is zero, `padded` is
/// shorter than a block, or no valid marker is found.
///
/// # Example
///
/// ```
/// use sodalite_codec::unpad;
///
/// let padded = *b"abc\x80\0\0\0\0";
/// assert_eq!(unpad(&padded, 8)?, 3);
/// assert!(unpad(b"abcdefgh", 8).is_err());
/// # Ok::<(), sodalite_codec::CodecError>(())
/// ```
pub fn unpad(padded: &[u8], blocksize: usize) -> Result<usize, CodecError> {
    let padded_len = padded.len();

    if blocksize == 0 || padded_len < blocksize {
        return Err(CodecError::Decode);
    }

    let tail = padded_len - 1;
    let mut acc = 0u8;
    let mut valid = 0u8;
    let mut pad_len = 0usize;

    for i in 0..blocksize {
        let c = padded[tail - i];

        // 1 iff every byte seen so far is zero, no marker was found yet and c is the marker
        let is_barrier = (((acc as usize).wrapping_sub(1)
            & pad_len.wrapping_sub(1)
            & ((c ^ 0x80) as usize).wrapping_sub(1))
            >> 8)
            & 1;

        acc |= c;
        pad_len |= i & 1usize.wrapping_add(!is_barrier);
        valid |= is_barrier as u8;
    }

    if valid == 0 {
        return Err(CodecError::Decode);
    }

    Ok(padded_len - 1 - pad_len)
}
