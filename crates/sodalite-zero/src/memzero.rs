// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Bulk zeroization of slices, vectors and scalars.

use alloc::vec::Vec;
use core::sync::atomic::{Ordering, compiler_fence};

/// Overwrites every byte of `buf` with zero.
///
/// Uses `write_bytes` (memset, vectorizable) followed by a volatile read of the
/// first byte and a sequentially consistent compiler fence. The volatile read makes
/// the store observable, so it survives dead-store elimination even when `buf` is
/// never read again.
///
/// # Example
///
/// ```
/// use sodalite_zero::memzero;
///
/// let mut secret = *b"correct horse battery staple";
/// memzero(&mut secret);
/// assert!(secret.iter().all(|&b| b == 0));
/// ```
#[inline(never)]
pub fn memzero(buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }

    unsafe {
        core::ptr::write_bytes(buf.as_mut_ptr(), 0, buf.len());
        core::ptr::read_volatile(buf.as_ptr());
    }
    compiler_fence(Ordering::SeqCst);
}

/// Zeroes the entire allocation of a `Vec<u8>`, from index 0 to capacity.
///
/// Spare capacity left behind by `truncate()` or `clear()` still holds the old
/// bytes; this wipes those too. Length is left untouched.
///
/// # Example
///
/// ```
/// use sodalite_zero::{is_vec_fully_zeroized, memzero_vec};
///
/// let mut vec = vec![0xFFu8; 64];
/// vec.truncate(8);
///
/// memzero_vec(&mut vec);
/// assert!(is_vec_fully_zeroized(&vec));
/// ```
#[inline(never)]
pub fn memzero_vec(vec: &mut Vec<u8>) {
    let cap = vec.capacity();
    if cap == 0 {
        return;
    }

    unsafe {
        core::ptr::write_bytes(vec.as_mut_ptr(), 0, cap);
        core::ptr::read_volatile(vec.as_ptr());
    }
    compiler_fence(Ordering::SeqCst);
}

/// Checks the whole allocation of a `Vec<u8>` (0 to capacity) for non-zero bytes.
///
/// Spare capacity is read through the raw pointer. `Vec` guarantees the allocation
/// is valid for `capacity` bytes and `u8` has no invalid bit patterns.
#[inline(never)]
pub fn is_vec_fully_zeroized(vec: &Vec<u8>) -> bool {
    let bytes = unsafe { core::slice::from_raw_parts(vec.as_ptr(), vec.capacity()) };
    bytes.iter().all(|&b| b == 0)
}

/// Zeroizes a single primitive value using a volatile write.
///
/// Valid for every type whose all-zero bit pattern is a valid value: integers,
/// `bool` (`false`), floats (`0.0`) and `char` (`'\0'`).
///
/// # Example
///
/// ```
/// use sodalite_zero::zeroize_primitive;
///
/// let mut counter = 0xDEADBEEFu32;
/// zeroize_primitive(&mut counter);
/// assert_eq!(counter, 0);
/// ```
#[inline(always)]
pub fn zeroize_primitive<T: Copy + crate::primitives::Primitive>(val: &mut T) {
    unsafe {
        core::ptr::write_volatile(val, core::mem::zeroed());
    }
    compiler_fence(Ordering::SeqCst);
}
