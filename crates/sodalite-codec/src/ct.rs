// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Branch-free byte comparisons producing `0xFF` (true) or `0x00` (false) masks.

#[inline(always)]
pub(crate) fn eq(x: u32, y: u32) -> u32 {
    ((0u32.wrapping_sub(x ^ y) >> 8) & 0xFF) ^ 0xFF
}

#[inline(always)]
pub(crate) fn gt(x: u32, y: u32) -> u32 {
    (y.wrapping_sub(x) >> 8) & 0xFF
}

#[inline(always)]
pub(crate) fn ge(x: u32, y: u32) -> u32 {
    gt(y, x) ^ 0xFF
}

#[inline(always)]
pub(crate) fn lt(x: u32, y: u32) -> u32 {
    gt(y, x)
}

#[inline(always)]
pub(crate) fn le(x: u32, y: u32) -> u32 {
    ge(y, x)
}
