// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Stack scrubbing.
//!
//! Rust has no variable-length stack arrays and no portable access to the stack
//! pointer, so [`stackzero`] approximates a `len`-byte scrub with a chain of
//! non-inlined frames, each owning a [`STACK_CHUNK`]-byte local that is wiped with
//! [`memzero`]. Each frame stays alive until the deeper frames return, so the wiped
//! region grows downward from the caller's frame by at least `len` bytes.
//!
//! # Limitations
//!
//! - Registers are never covered. Secrets spilled only to registers survive.
//! - Granularity is one chunk plus frame overhead; the scrubbed region may exceed
//!   `len` but never falls short of it.
//! - Requesting more than the remaining stack overflows it, like a C VLA would.

use core::sync::atomic::{Ordering, compiler_fence};

use crate::memzero::memzero;

/// Bytes of stack wiped per frame by [`stackzero`].
pub const STACK_CHUNK: usize = 512;

/// Overwrites at least `len` bytes of stack below the current frame with zeros.
///
/// Call this right after a function that kept secrets in stack locals returns, so
/// the dead frame is overwritten before anything else reuses the memory.
///
/// # Example
///
/// ```
/// use sodalite_zero::stackzero;
///
/// fn derive() -> u8 {
///     let key = [0x5Au8; 256];
///     key.iter().fold(0, |acc, b| acc ^ b)
/// }
///
/// let tag = derive();
/// stackzero(1024);
/// assert_eq!(tag, 0);
/// ```
#[inline(never)]
pub fn stackzero(len: usize) {
    if len == 0 {
        return;
    }

    scrub(len);
    compiler_fence(Ordering::SeqCst);
}

#[inline(never)]
fn scrub(remaining: usize) {
    let mut fodder = [0u8; STACK_CHUNK];
    memzero(&mut fodder);

    if remaining > STACK_CHUNK {
        scrub(remaining - STACK_CHUNK);
    }

    // Keeps `fodder` live across the recursive call (no tail call, no slot reuse).
    core::hint::black_box(&fodder);
}
