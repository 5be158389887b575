// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors that can occur when selecting a backend or generating random data.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum EntropyError {
    /// The entropy source failed to generate random data.
    #[error("EntropyNotAvailable")]
    EntropyNotAvailable,

    /// A backend was already resolved; the selection can no longer change.
    #[error("AlreadyInitialized")]
    AlreadyInitialized,

    /// The candidate backend failed its capability check.
    #[error("Unavailable")]
    Unavailable,
}
