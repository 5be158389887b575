// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Init-once backend selection.
//!
//! `SELECTED` is written only by the thread that moved `INIT_STATE` from
//! `STATE_UNINIT` to `STATE_IN_PROGRESS`, and read only after observing
//! `STATE_DONE` with `Acquire` ordering.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::EntropyError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;

/// Initialization state: no backend resolved yet
pub(crate) const STATE_UNINIT: u8 = 0;
/// Initialization state: a thread is resolving or registering a backend
pub(crate) const STATE_IN_PROGRESS: u8 = 1;
/// Initialization state: backend resolved, `SELECTED` is frozen
pub(crate) const STATE_DONE: u8 = 2;

static SYSTEM: SystemEntropySource = SystemEntropySource;

pub(crate) static INIT_STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);

struct Slot(UnsafeCell<&'static dyn EntropySource>);

// SAFETY: access to the cell is serialized by INIT_STATE (see module docs).
unsafe impl Sync for Slot {}

static SELECTED: Slot = Slot(UnsafeCell::new(&SYSTEM));

/// Held while this thread owns `STATE_IN_PROGRESS`. Dropping it without
/// [`InProgress::complete`], on an early return or a panic in backend code, rolls
/// the state back to `STATE_UNINIT`.
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

/// Registers `source` as the process-wide entropy backend.
///
/// Must happen before the backend is first used. Fails with
/// [`EntropyError::AlreadyInitialized`] once a backend has been resolved, and with
/// [`EntropyError::Unavailable`] if `source.is_available()` returns `false`, in
/// which case the selection stays open. It also stays open if `is_available`
/// panics.
///
/// # Example
///
/// ```
/// use sodalite_rand::{EntropyError, EntropySource, entropy_source, set_entropy_source};
///
/// // Resolving the backend closes the selection.
/// let _ = entropy_source();
///
/// struct Fixed;
/// impl EntropySource for Fixed {
///     fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
///         dest.fill(4);
///         Ok(())
///     }
/// }
///
/// static FIXED: Fixed = Fixed;
/// assert_eq!(set_entropy_source(&FIXED), Err(EntropyError::AlreadyInitialized));
/// ```
pub fn set_entropy_source(source: &'static dyn EntropySource) -> Result<(), EntropyError> {
    if INIT_STATE
        .compare_exchange(
            STATE_UNINIT,
            STATE_IN_PROGRESS,
            Ordering::Acquire,
            Ordering::Relaxed,
        )
        .is_err()
    {
        return Err(EntropyError::AlreadyInitialized);
    }
    let guard = InProgress;

    if !source.is_available() {
        return Err(EntropyError::Unavailable);
    }

    // SAFETY: this thread owns STATE_IN_PROGRESS; no reader exists until STATE_DONE.
    unsafe {
        *SELECTED.0.get() = source;
    }
    guard.complete();

    Ok(())
}

/// Returns the process-wide entropy backend, resolving it on first call.
///
/// Thread-safe: concurrent first calls spin until one of them has resolved the
/// backend.
#[inline]
pub fn entropy_source() -> &'static dyn EntropySource {
    if INIT_STATE.load(Ordering::Acquire) != STATE_DONE {
        init_slow();
    }

    // SAFETY: STATE_DONE was observed with Acquire; SELECTED is never written again.
    unsafe { *SELECTED.0.get() }
}

#[cold]
#[inline(never)]
fn init_slow() {
    loop {
        match INIT_STATE.compare_exchange(
            STATE_UNINIT,
            STATE_IN_PROGRESS,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                // Nothing registered: SELECTED still holds the system source.
                INIT_STATE.store(STATE_DONE, Ordering::Release);
                return;
            }
            Err(STATE_DONE) => return,
            // A registration may still roll back to STATE_UNINIT, so retry the CAS.
            Err(_) => core::hint::spin_loop(),
        }
    }
}

/// Restores the unresolved state. Tests only; callers must be serialized.
#[cfg(test)]
pub(crate) fn reset_state() {
    // SAFETY: tests calling this run under #[serial(entropy)] with no concurrent readers.
    unsafe {
        *SELECTED.0.get() = &SYSTEM;
    }
    INIT_STATE.store(STATE_UNINIT, Ordering::SeqCst);
}
