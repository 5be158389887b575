// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # sodalite-rand
//!
//! Process-wide entropy backend for sodalite.
//!
//! The backend is resolved exactly once. Until then a custom source may be
//! registered with [`set_entropy_source`]; the first call to [`entropy_source`]
//! (directly or through [`fill`], [`random_u32`] or [`uniform`]) locks in
//! whatever is registered, defaulting to [`SystemEntropySource`].
//!
//! ## Example
//!
//! ```rust
//! use sodalite_rand::{fill, uniform};
//!
//! let mut salt = [0u8; 16];
//! fill(&mut salt).expect("Failed to fill(..)");
//!
//! let die = uniform(6).expect("Failed to uniform(..)");
//! assert!(die < 6);
//! ```
//!
//! ## Platform Support
//!
//! [`SystemEntropySource`] works wherever `getrandom` does:
//! - Linux/Android: `getrandom()` syscall
//! - macOS/iOS: `getentropy()`
//! - Windows: `BCryptGenRandom`
//! - WASI: `random_get`

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod random;
mod selection;
mod support;
mod system;
mod traits;

pub use error::EntropyError;
pub use random::{fill, random_u32, uniform};
pub use selection::{entropy_source, set_entropy_source};
pub use system::SystemEntropySource;
pub use traits::EntropySource;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
