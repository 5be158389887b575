// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # sodalite-zero
//!
//! Zeroization primitives the optimizer is not allowed to remove.
//!
//! A plain `buf.fill(0)` right before a buffer goes out of scope is a dead store:
//! the compiler may legally delete it. Every write in this crate is followed by a
//! volatile read and a `compiler_fence`, so the zeroed bytes are observable.
//!
//! ## Functions
//!
//! - [`memzero`]: wipes a byte slice
//! - [`stackzero`]: scrubs stack memory below the caller's frame
//! - [`zeroize_primitive`]: wipes a single scalar with a volatile write
//!
//! ## Traits
//!
//! - [`FastZeroizable`]: in-place zeroization (dyn-compatible)
//! - [`ZeroizationProbe`]: runtime check that a value is all zeros
//!
//! ## Example
//!
//! ```rust
//! use sodalite_zero::{memzero, FastZeroizable, ZeroizationProbe};
//!
//! let mut key = [0x42u8; 32];
//! memzero(&mut key);
//! assert!(key.is_zeroized());
//!
//! let mut nonce = vec![0xAAu8; 24];
//! nonce.fast_zeroize();
//! assert!(nonce.is_zeroized());
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod collections;
mod memzero;
mod primitives;
mod stack;
mod traits;

pub use memzero::{is_vec_fully_zeroized, memzero, memzero_vec, zeroize_primitive};
pub use primitives::Primitive;
pub use stack::{STACK_CHUNK, stackzero};
pub use traits::{FastZeroizable, ZeroizationProbe};
