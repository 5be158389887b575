// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Low-level building blocks for handling secret material in Rust.</em></p>
//!
//! ---
//!
//! Sodalite bundles the utilities every cryptographic codebase ends up rewriting:
//!
//! - **Constant-time comparison** of MACs, tags and keys ([`memcmp_ct`],
//!   [`compare_le`], [`is_zero`])
//! - **Little-endian counters** for nonces ([`increment`], [`add`], `sub`)
//! - **Zeroization** the optimizer cannot elide ([`memzero`], [`stackzero`])
//! - **Hex and base64 codecs** with constant-time character mapping and
//!   ignore sets ([`bin2hex`], [`hex2bin`], [`bin2base64`], [`base642bin`])
//! - **ISO/IEC 7816-4 padding** ([`pad`], [`unpad`])
//! - **Guarded allocations** with guard pages, a canary and explicit protection
//!   modes (`SecretBuffer`, Unix only)
//!
//! Each concern lives in its own crate and is re-exported here as a module
//! ([`ct`], [`zero`], [`codec`], [`rand`], [`buffer`]).
//!
//! # Quick Start
//!
//! ```rust
//! use sodalite::{Base64Variant, InitStatus, base642bin, bin2base64, init, memcmp_ct};
//!
//! fn main() -> Result<(), sodalite::Error> {
//!     assert!(matches!(init()?, InitStatus::Initialized | InitStatus::AlreadyInitialized));
//!
//!     let tag = [0x5Au8; 16];
//!     let encoded = bin2base64(&tag, Base64Variant::UrlSafeNoPadding);
//!
//!     let mut decoded = [0u8; 16];
//!     base642bin(&encoded, "", &mut decoded, Base64Variant::UrlSafeNoPadding)?;
//!     assert!(memcmp_ct(&tag, &decoded));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Guarded allocations
//!
//! ```rust
//! # #[cfg(unix)]
//! # fn example() -> Result<(), sodalite::Error> {
//! use sodalite::{SecretBuffer, hex2bin};
//!
//! let mut key = SecretBuffer::allocate(32)?;
//! key.open_mut(|bytes| hex2bin("00".repeat(32), "", bytes))??;
//! key.mprotect_noaccess()?;
//!
//! // Dropping (or freeing) the buffer checks the canary and wipes the pages.
//! key.free()?;
//! # Ok(())
//! # }
//! # #[cfg(unix)]
//! # example().expect("Failed to example()");
//! ```
//!
//! # Initialization
//!
//! [`init`] is optional. It locks in the entropy backend, resolves the page size
//! and draws the allocation canary up front, so that failures surface at startup
//! rather than at the first allocation. To use a custom entropy backend, register
//! it with [`rand::set_entropy_source`] before calling [`init`].

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod init;

pub mod support;

pub use sodalite_buffer as buffer;
pub use sodalite_codec as codec;
pub use sodalite_ct as ct;
pub use sodalite_rand as rand;
pub use sodalite_zero as zero;

pub use error::Error;
pub use init::{InitStatus, init};

pub use sodalite_ct::{HAS_SUB, add, compare_le, compare_lex, increment, is_zero, memcmp_ct};
#[cfg(feature = "sub")]
pub use sodalite_ct::sub;

pub use sodalite_zero::{FastZeroizable, ZeroizationProbe, memzero, stackzero};

pub use sodalite_codec::{
    Base64Variant, CodecError, Decoded, base64_encoded_len, base642bin, bin2base64, bin2hex,
    hex2bin, pad, unpad,
};

pub use sodalite_buffer::{AccessMode, AllocError};
#[cfg(unix)]
pub use sodalite_buffer::SecretBuffer;

pub use sodalite_rand::EntropyError;
