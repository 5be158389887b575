// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for sodalite-codec.

use thiserror::Error;

/// Errors returned by the codecs and by padding.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum CodecError {
    /// Input is not valid for the codec: bad character, odd digit count,
    /// non-canonical trailing bits, malformed padding or trailing data.
    #[error("DecodeError: malformed encoded input")]
    Decode,

    /// The output would not fit into the caller-supplied buffer.
    #[error("BufferTooSmall: output exceeds buffer capacity")]
    BufferTooSmall,
}
