// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Trait implementations for primitive scalars.

use crate::memzero::zeroize_primitive;
use crate::traits::{FastZeroizable, ZeroizationProbe};

mod sealed {
    pub trait Sealed {}
}

/// Scalar types whose all-zero bit pattern is a valid value.
///
/// Sealed: implemented only for the integer types, `bool`, `f32`, `f64` and `char`.
pub trait Primitive: sealed::Sealed {}

macro_rules! impl_primitive {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Primitive for $ty {}

            impl FastZeroizable for $ty {
                #[inline(always)]
                fn fast_zeroize(&mut self) {
                    zeroize_primitive(self);
                }
            }

            impl ZeroizationProbe for $ty {
                #[inline(always)]
                fn is_zeroized(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

impl_primitive!(
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    bool => false,
    f32 => 0.0, f64 => 0.0,
    char => '\0',
);
