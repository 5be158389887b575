// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::selection::entropy_source;

/// Fills `buf` with random bytes from the selected backend.
pub fn fill(buf: &mut [u8]) -> Result<(), EntropyError> {
    entropy_source().fill_bytes(buf)
}

/// Returns a uniformly distributed random `u32`.
pub fn random_u32() -> Result<u32, EntropyError> {
    let mut bytes = [0u8; 4];
    fill(&mut bytes)?;

    Ok(u32::from_ne_bytes(bytes))
}

/// Returns a uniformly distributed value in `[0, upper)` without modulo bias.
///
/// Returns `0` for `upper < 2`.
///
/// # Example
///
/// ```
/// use sodalite_rand::uniform;
///
/// assert_eq!(uniform(0)?, 0);
/// assert_eq!(uniform(1)?, 0);
/// assert!(uniform(10)? < 10);
/// # Ok::<(), sodalite_rand::EntropyError>(())
/// ```
pub fn uniform(upper: u32) -> Result<u32, EntropyError> {
    uniform_with(upper, random_u32)
}

/// Rejection sampling: draws below `2^32 mod upper` are discarded so every
/// residue has the same number of preimages.
pub(crate) fn uniform_with(
    upper: u32,
    mut next: impl FnMut() -> Result<u32, EntropyError>,
) -> Result<u32, EntropyError> {
    if upper < 2 {
        return Ok(0);
    }

    let min = upper.wrapping_neg() % upper;

    loop {
        let r = next()?;
        if r >= min {
            return Ok(r % upper);
        }
    }
}
