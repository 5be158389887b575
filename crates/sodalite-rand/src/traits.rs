// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;

/// A cryptographically secure source of random bytes.
///
/// The selected source is shared by every thread of the process, hence `Sync`.
pub trait EntropySource: Sync {
    /// Fills `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Capability check run once before the source is registered.
    fn is_available(&self) -> bool {
        true
    }
}
