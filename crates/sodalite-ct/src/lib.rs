// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # sodalite-ct
//!
//! Constant-time primitives for secret-dependent comparisons and nonce arithmetic.
//!
//! Every function here runs in time that depends only on the slice lengths, never
//! on the byte values or on the position of the first difference. Lengths are
//! treated as public.
//!
//! ## Comparison
//!
//! - [`memcmp_ct`]: equality of MACs, keys, tags
//! - [`compare_lex`]: ordering of byte strings, first byte most significant
//! - [`compare_le`]: ordering of little-endian integers (nonces, counters)
//! - [`is_zero`]: all-zero test
//!
//! ## Counters
//!
//! - [`increment`], [`add`] and, with the `sub` feature, [`sub`]
//!
//! ```rust
//! use sodalite_ct::{increment, memcmp_ct};
//!
//! let mut nonce = [0xFF, 0x00, 0x00];
//! increment(&mut nonce);
//! assert!(memcmp_ct(&nonce, &[0x00, 0x01, 0x00]));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod compare;
mod counter;

pub use compare::{compare_le, compare_lex, is_zero, memcmp_ct};
pub use counter::{HAS_SUB, add, increment};

#[cfg(feature = "sub")]
pub use counter::sub;
