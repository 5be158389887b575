// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

use sodalite_buffer::AllocError;
use sodalite_codec::CodecError;
use sodalite_rand::EntropyError;

/// Any error produced by the sodalite crates.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum Error {
    /// Hex, base64 or padding failure.
    #[error("CodecError: {0}")]
    Codec(#[from] CodecError),

    /// Guarded allocation failure.
    #[error("AllocError: {0}")]
    Alloc(#[from] AllocError),

    /// Entropy backend failure.
    #[error("EntropyError: {0}")]
    Entropy(#[from] EntropyError),
}
