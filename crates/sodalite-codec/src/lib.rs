// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # sodalite-codec
//!
//! Hex and base64 codecs for secret material, plus ISO/IEC 7816-4 block padding.
//!
//! Character classification is branch-free: the value of a digit never selects a
//! code path, only its validity does. Decoders write into a caller-provided buffer
//! so decoded secrets can land directly in guarded memory, and they wipe any
//! partial output when decoding fails.
//!
//! ## Ignore sets and consumed length
//!
//! Decoders take an `ignore` set of separator characters (spaces, newlines,
//! colons) that are skipped between encoded units. They report a [`Decoded`] with
//! both the output length and the number of input bytes consumed:
//!
//! - [`hex2bin`] / [`base642bin`] are strict: anything that is neither valid input
//!   nor in `ignore` is a [`CodecError::Decode`].
//! - [`hex2bin_prefix`] / [`base642bin_prefix`] stop at the first such character
//!   and report how far they got, so callers can reject or inspect trailing data.
//!
//! ```rust
//! use sodalite_codec::{Base64Variant, base642bin, bin2base64, hex2bin};
//!
//! let mut key = [0u8; 4];
//! let decoded = hex2bin("de ad be ef", " ", &mut key)?;
//! assert_eq!(key, [0xde, 0xad, 0xbe, 0xef]);
//! assert_eq!(decoded.consumed, 11);
//!
//! let encoded = bin2base64(&key, Base64Variant::UrlSafeNoPadding);
//! let mut back = [0u8; 4];
//! base642bin(&encoded, "", &mut back, Base64Variant::UrlSafeNoPadding)?;
//! assert_eq!(back, key);
//! # Ok::<(), sodalite_codec::CodecError>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod base64;
mod ct;
mod error;
mod hex;
mod padding;
mod types;

pub use base64::{
    base64_encoded_len, base642bin, base642bin_prefix, bin2base64, bin2base64_into,
};
pub use error::CodecError;
pub use hex::{bin2hex, bin2hex_into, hex2bin, hex2bin_prefix};
pub use padding::{pad, unpad};
pub use types::{Base64Variant, Decoded};
