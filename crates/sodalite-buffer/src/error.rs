// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for sodalite-buffer.

use sodalite_rand::EntropyError;
use thiserror::Error;

use crate::mode::AccessMode;

/// Errors that can occur when allocating, protecting or freeing a guarded buffer.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// `count * size` overflowed in [`allocate_array`](crate::SecretBuffer::allocate_array).
    #[error("allocation size overflow")]
    Overflow,

    /// The size is too large to lay out, or `mmap`/`mprotect` failed during setup.
    #[error("allocation failed")]
    Allocation,

    /// `mprotect` failed while changing the protection mode.
    #[error("mprotect failed")]
    Protection,

    /// The canary or the header no longer match what was written at allocation.
    #[error("canary or header corrupted")]
    IntegrityViolation,

    /// The buffer's current protection mode does not allow the requested access.
    #[error("access denied in mode {0:?}")]
    AccessDenied(AccessMode),

    /// The canary could not be drawn from the entropy source.
    #[error("EntropyError: {0}")]
    Entropy(#[from] EntropyError),
}
