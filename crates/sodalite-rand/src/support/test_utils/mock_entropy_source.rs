// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::system::SystemEntropySource;
use crate::traits::EntropySource;

/// Configurable behavior for [`MockEntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntropySourceBehaviour {
    /// Normal operation (delegates to the system source).
    None,
    /// Simulates a generator failure on every request.
    FailAtFillBytes,
    /// Fails the capability check, so the source cannot be registered.
    Unavailable,
    /// Fills every request with the given byte.
    Constant(u8),
    /// Panics inside `fill_bytes`.
    PanicAtFillBytes,
    /// Panics inside the capability check.
    PanicAtIsAvailable,
}

/// Mock entropy source for testing.
///
/// Wraps [`SystemEntropySource`] but allows simulating failures via
/// [`MockEntropySourceBehaviour`]. Registration requires a `'static` reference,
/// so mocks are usually declared as `static` items.
pub struct MockEntropySource {
    inner: SystemEntropySource,
    behaviour: MockEntropySourceBehaviour,
}

impl MockEntropySource {
    /// Creates a new mock entropy source with the specified behavior.
    pub const fn new(behaviour: MockEntropySourceBehaviour) -> Self {
        Self {
            inner: SystemEntropySource,
            behaviour,
        }
    }

    /// Returns the configured behavior.
    pub fn behaviour(&self) -> MockEntropySourceBehaviour {
        self.behaviour
    }
}

impl EntropySource for MockEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        match self.behaviour {
            MockEntropySourceBehaviour::None => self.inner.fill_bytes(dest),
            MockEntropySourceBehaviour::FailAtFillBytes | MockEntropySourceBehaviour::Unavailable => {
                Err(EntropyError::EntropyNotAvailable)
            }
            MockEntropySourceBehaviour::Constant(byte) => {
                dest.fill(byte);
                Ok(())
            }
            MockEntropySourceBehaviour::PanicAtFillBytes => panic!("mock entropy source: fill_bytes"),
            MockEntropySourceBehaviour::PanicAtIsAvailable => self.inner.fill_bytes(dest),
        }
    }

    fn is_available(&self) -> bool {
        match self.behaviour {
            MockEntropySourceBehaviour::Unavailable => false,
            MockEntropySourceBehaviour::PanicAtIsAvailable => panic!("mock entropy source: is_available"),
            _ => true,
        }
    }
}
