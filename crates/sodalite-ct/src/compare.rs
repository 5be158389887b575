// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Constant-time equality, ordering and zero tests.
//!
//! Bytes are read with `read_volatile` so the loops cannot be turned into an
//! early-exit `memcmp` by the optimizer. Masks are derived from the borrow bit of
//! a 16-bit subtraction instead of comparisons.

use core::cmp::Ordering;
use core::ptr::read_volatile;

/// Maps an accumulated difference to `true` iff it is zero, without branching.
#[inline(always)]
fn is_zero_mask(d: u8) -> bool {
    (1 & ((d as u16).wrapping_sub(1) >> 8)) == 1
}

/// Returns `true` iff `a` and `b` hold the same bytes.
///
/// Runs in time depending only on the length. Slices of different lengths are
/// never equal; the length check is the only early exit, since lengths are public.
///
/// # Example
///
/// ```
/// use sodalite_ct::memcmp_ct;
///
/// let expected_tag = [0x1d, 0x2e, 0x3f, 0x40];
/// assert!(memcmp_ct(&expected_tag, &[0x1d, 0x2e, 0x3f, 0x40]));
/// assert!(!memcmp_ct(&expected_tag, &[0x1d, 0x2e, 0x3f, 0x41]));
/// assert!(memcmp_ct(&[], &[]));
/// ```
#[inline(never)]
pub fn memcmp_ct(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut d = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        d |= unsafe { read_volatile(x) ^ read_volatile(y) };
    }

    is_zero_mask(d)
}

/// Returns `true` iff every byte of `buf` is zero. The empty slice is zero.
///
/// # Example
///
/// ```
/// use sodalite_ct::is_zero;
///
/// assert!(is_zero(&[0, 0, 0]));
/// assert!(!is_zero(&[0, 0, 1]));
/// assert!(is_zero(&[]));
/// ```
#[inline(never)]
pub fn is_zero(buf: &[u8]) -> bool {
    let mut d = 0u8;
    for x in buf {
        d |= unsafe { read_volatile(x) };
    }

    is_zero_mask(d)
}

/// Shared ordering kernel. `pairs` yields byte pairs from most to least significant.
///
/// `gt` latches at the first differing position while `eq` is still set; every
/// pair is visited regardless.
#[inline(always)]
fn compare_ct<'a>(pairs: impl Iterator<Item = (&'a u8, &'a u8)>) -> Ordering {
    let mut gt = 0u16;
    let mut eq = 1u16;

    for (x1, x2) in pairs {
        let x1 = unsafe { read_volatile(x1) } as u16;
        let x2 = unsafe { read_volatile(x2) } as u16;

        gt |= (x2.wrapping_sub(x1) >> 8) & eq;
        eq &= (x2 ^ x1).wrapping_sub(1) >> 8;
    }

    match (gt + gt + (eq & 1)) as i8 - 1 {
        -1 => Ordering::Less,
        0 => Ordering::Equal,
        _ => Ordering::Greater,
    }
}

/// Compares two byte strings lexicographically as unsigned bytes, first byte most
/// significant (big-endian integer order).
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Example
///
/// ```
/// use core::cmp::Ordering;
/// use sodalite_ct::compare_lex;
///
/// assert_eq!(compare_lex(&[0x01, 0x00], &[0x00, 0xFF]), Ordering::Greater);
/// assert_eq!(compare_lex(&[0x00, 0x01], &[0x00, 0x02]), Ordering::Less);
/// assert_eq!(compare_lex(&[], &[]), Ordering::Equal);
/// ```
#[inline(never)]
pub fn compare_lex(a: &[u8], b: &[u8]) -> Ordering {
    assert_eq!(a.len(), b.len(), "compare_lex: length mismatch");

    compare_ct(a.iter().zip(b.iter()))
}

/// Compares two little-endian unsigned integers of equal width (last byte most
/// significant). This is the ordering nonces and counters built with
/// [`increment`](crate::increment) follow.
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Example
///
/// ```
/// use core::cmp::Ordering;
/// use sodalite_ct::compare_le;
///
/// // 0x0001 vs 0x00FF
/// assert_eq!(compare_le(&[0x01, 0x00], &[0xFF, 0x00]), Ordering::Less);
/// // 0x0100 vs 0x00FF
/// assert_eq!(compare_le(&[0x00, 0x01], &[0xFF, 0x00]), Ordering::Greater);
/// ```
#[inline(never)]
pub fn compare_le(a: &[u8], b: &[u8]) -> Ordering {
    assert_eq!(a.len(), b.len(), "compare_le: length mismatch");

    compare_ct(a.iter().rev().zip(b.iter().rev()))
}
