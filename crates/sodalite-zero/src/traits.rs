// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Core zeroization traits.

/// Trait for types that can be zeroized in place.
///
/// Dyn-compatible, so heterogeneous secrets can be wiped through
/// `&mut dyn FastZeroizable`.
pub trait FastZeroizable {
    /// Overwrites all sensitive bytes with zeros.
    fn fast_zeroize(&mut self);
}

/// Trait for verifying that a value has been zeroized.
///
/// Used in tests and debug assertions to check that no sensitive data remains.
///
/// # Example
///
/// ```rust
/// use sodalite_zero::{FastZeroizable, ZeroizationProbe};
///
/// let mut value: u64 = 42;
/// assert!(!value.is_zeroized());
///
/// value.fast_zeroize();
/// assert!(value.is_zeroized());
/// ```
pub trait ZeroizationProbe {
    /// Returns `true` if every byte of the value is zero.
    fn is_zeroized(&self) -> bool;
}
