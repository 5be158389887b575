// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use getrandom::Error as GetRandomError;

use crate::error::EntropyError;
use crate::traits::EntropySource;

type FillFn = fn(&mut [u8]) -> Result<(), GetRandomError>;

/// The operating system CSPRNG, reached through `getrandom`.
///
/// Selected by default when no other backend was registered before first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropySource;

impl SystemEntropySource {
    /// Runs `fill_fn` and collapses any OS error into
    /// [`EntropyError::EntropyNotAvailable`]; the OS error code is not kept.
    pub(crate) fn fill_with(fill_fn: FillFn, dest: &mut [u8]) -> Result<(), EntropyError> {
        fill_fn(dest).map_err(|_| EntropyError::EntropyNotAvailable)
    }
}

impl EntropySource for SystemEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        Self::fill_with(getrandom::fill, dest)
    }

    /// Probes the OS generator with a one-byte request.
    fn is_available(&self) -> bool {
        let mut probe = [0u8; 1];
        self.fill_bytes(&mut probe).is_ok()
    }
}
