// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Process-wide canary, drawn once from the selected entropy source.
//!
//! `CANARY` is written only by the thread that moved `INIT_STATE` to
//! `STATE_IN_PROGRESS` and read only after `STATE_DONE` was observed with
//! `Acquire` ordering. A failed or panicking draw rolls the state back so a later
//! call can retry.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, Ordering};

use sodalite_rand::EntropyError;

/// Size in bytes of the canary stored right before each buffer's data.
pub const CANARY_SIZE: usize = 16;

const STATE_UNINIT: u8 = 0;
const STATE_IN_PROGRESS: u8 = 1;
const STATE_DONE: u8 = 2;

static INIT_STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);

struct Slot(UnsafeCell<[u8; CANARY_SIZE]>);

// SAFETY: access to the cell is serialized by INIT_STATE (see module docs).
unsafe impl Sync for Slot {}

static CANARY: Slot = Slot(UnsafeCell::new([0u8; CANARY_SIZE]));

/// Rolls `INIT_STATE` back to `STATE_UNINIT` on drop unless completed.
struct InProgress;

impl InProgress {
    fn complete(self) {
        core::mem::forget(self);
        INIT_STATE.store(STATE_DONE, Ordering::Release);
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        INIT_STATE.store(STATE_UNINIT, Ordering::Release);
    }
}

/// Returns the process canary, drawing it on first use.
pub(crate) fn canary() -> Result<&'static [u8; CANARY_SIZE], EntropyError> {
    if INIT_STATE.load(Ordering::Acquire) != STATE_DONE {
        init_slow()?;
    }

    // SAFETY: STATE_DONE observed with Acquire; CANARY is never written again.
    Ok(unsafe { &*CANARY.0.get() })
}

#[cold]
#[inline(never)]
fn init_slow() -> Result<(), EntropyError> {
    loop {
        match INIT_STATE.compare_exchange(
            STATE_UNINIT,
            STATE_IN_PROGRESS,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                let guard = InProgress;

                // SAFETY: this thread owns STATE_IN_PROGRESS; no reader exists yet.
                let slot = unsafe { &mut *CANARY.0.get() };
                sodalite_rand::fill(slot)?;

                guard.complete();
                return Ok(());
            }
            Err(STATE_DONE) => return Ok(()),
            Err(_) => core::hint::spin_loop(),
        }
    }
}
