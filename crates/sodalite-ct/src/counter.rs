// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Constant-time arithmetic on little-endian byte vectors.
//!
//! The width is fixed by the slice length and never changes; results wrap modulo
//! `2^(8 * len)`. Carries and borrows are propagated through every byte, so the
//! running time depends only on the length.

/// Whether this build exposes [`sub`]. Callers that must work with minimal builds
/// can branch on this instead of on the cargo feature of a dependency.
pub const HAS_SUB: bool = cfg!(feature = "sub");

/// Adds 1 to the little-endian integer `n`, wrapping to zero on overflow.
///
/// # Example
///
/// ```
/// use sodalite_ct::increment;
///
/// let mut n = [0xFF, 0xFF];
/// increment(&mut n);
/// assert_eq!(n, [0x00, 0x00]);
/// ```
#[inline(never)]
pub fn increment(n: &mut [u8]) {
    let mut c = 1u16;

    for byte in n.iter_mut() {
        c += *byte as u16;
        *byte = c as u8;
        c >>= 8;
    }
}

/// Computes `a := a + b` modulo `2^(8 * a.len())`, little-endian.
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Example
///
/// ```
/// use sodalite_ct::add;
///
/// let mut a = [0x01, 0x00];
/// add(&mut a, &[0xFF, 0x00]);
/// assert_eq!(a, [0x00, 0x01]);
/// ```
#[inline(never)]
pub fn add(a: &mut [u8], b: &[u8]) {
    assert_eq!(a.len(), b.len(), "add: length mismatch");

    let mut c = 0u16;

    for (x, y) in a.iter_mut().zip(b.iter()) {
        c += *x as u16 + *y as u16;
        *x = c as u8;
        c >>= 8;
    }
}

/// Computes `a := a - b` modulo `2^(8 * a.len())`, little-endian.
///
/// Available with the `sub` feature (enabled by default).
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Example
///
/// ```
/// use sodalite_ct::sub;
///
/// let mut a = [0x00, 0x00];
/// sub(&mut a, &[0x01, 0x00]);
/// assert_eq!(a, [0xFF, 0xFF]);
/// ```
#[cfg(feature = "sub")]
#[inline(never)]
pub fn sub(a: &mut [u8], b: &[u8]) {
    assert_eq!(a.len(), b.len(), "sub: length mismatch");

    let mut c = 0u16;

    for (x, y) in a.iter_mut().zip(b.iter()) {
        c = (*x as u16).wrapping_sub(*y as u16).wrapping_sub(c);
        *x = c as u8;
        c = (c >> 8) & 1;
    }
}
