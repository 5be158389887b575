// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::Error;

/// Outcome of a successful [`init`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InitStatus {
    /// This call performed the initialization.
    Initialized,
    /// A previous call already did.
    AlreadyInitialized,
}

/// Initialization state: not yet attempted, or last attempt failed
pub(crate) const STATE_UNINIT: u8 = 0;
/// Initialization state: in progress by another thread
const STATE_IN_PROGRESS: u8 = 1;
/// Initialization state: completed
const STATE_DONE: u8 = 2;

pub(crate) static INIT_STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);

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

/// Eagerly resolves process-wide state: the entropy backend, the page size and
/// the allocation canary.
///
/// Idempotent and thread-safe. Returns [`InitStatus::Initialized`] for the call
/// that performed the work and [`InitStatus::AlreadyInitialized`] afterwards.
/// A failed or panicking attempt leaves nothing marked as done, so it can be
/// retried.
///
/// # Example
///
/// ```
/// use sodalite::{InitStatus, init};
///
/// let first = init()?;
/// assert_eq!(init()?, InitStatus::AlreadyInitialized);
/// # let _ = first;
/// # Ok::<(), sodalite::Error>(())
/// ```
pub fn init() -> Result<InitStatus, Error> {
    loop {
        match INIT_STATE.compare_exchange(
            STATE_UNINIT,
            STATE_IN_PROGRESS,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                let guard = InProgress;
                resolve()?;

                guard.complete();
                return Ok(InitStatus::Initialized);
            }
            Err(STATE_DONE) => return Ok(InitStatus::AlreadyInitialized),
            Err(_) => core::hint::spin_loop(),
        }
    }
}

fn resolve() -> Result<(), Error> {
    let source = sodalite_rand::entropy_source();

    let mut probe = [0u8; 1];
    source.fill_bytes(&mut probe)?;

    #[cfg(unix)]
    sodalite_buffer::prepare()?;

    Ok(())
}
