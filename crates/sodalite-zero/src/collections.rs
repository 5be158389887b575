// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Trait implementations for byte collections.

use alloc::vec::Vec;

use crate::memzero::{is_vec_fully_zeroized, memzero, memzero_vec};
use crate::traits::{FastZeroizable, ZeroizationProbe};

// === === === === === === === === === ===
// [u8] - slices
// === === === === === === === === === ===
impl FastZeroizable for [u8] {
    #[inline(always)]
    fn fast_zeroize(&mut self) {
        memzero(self);
    }
}

impl ZeroizationProbe for [u8] {
    #[inline(always)]
    fn is_zeroized(&self) -> bool {
        self.iter().all(|&b| b == 0)
    }
}

// === === === === === === === === === ===
// [u8; N] - arrays
// === === === === === === === === === ===
impl<const N: usize> FastZeroizable for [u8; N] {
    #[inline(always)]
    fn fast_zeroize(&mut self) {
        memzero(self.as_mut_slice());
    }
}

impl<const N: usize> ZeroizationProbe for [u8; N] {
    #[inline(always)]
    fn is_zeroized(&self) -> bool {
        self.as_slice().is_zeroized()
    }
}

// === === === === === === === === === ===
// Vec<u8>
// === === === === === === === === === ===
impl FastZeroizable for Vec<u8> {
    /// Wipes the whole allocation, spare capacity included.
    #[inline(always)]
    fn fast_zeroize(&mut self) {
        memzero_vec(self);
    }
}

impl ZeroizationProbe for Vec<u8> {
    #[inline(always)]
    fn is_zeroized(&self) -> bool {
        is_vec_fully_zeroized(self)
    }
}
