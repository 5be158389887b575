// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecretBuffer - guarded allocation handle.
//!
//! Layout of a mapping, with `P` the page size and `U` the unprotected size
//! (`CANARY_SIZE + len` rounded up to `P`):
//!
//! ```text
//! offset 0      P       2P                              2P+U     3P+U
//!        |header|guard  |padding | canary | user data    |guard   |
//! ```
//!
//! Protection modes apply to the whole unprotected region `[2P, 2P+U)`, canary
//! included. Header and guard pages never change protection while the buffer
//! lives.

use core::fmt;
use core::mem::ManuallyDrop;
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};

use sodalite_ct::memcmp_ct;
use sodalite_zero::memzero;

use crate::canary::{CANARY_SIZE, canary};
use crate::error::AllocError;
use crate::mode::AccessMode;
use crate::page::{Mapping, page_round, page_size};

/// Byte written over the user region of every fresh allocation.
pub const GARBAGE_BYTE: u8 = 0xdb;

/// Exit code of a test build when `Drop` aborts.
#[cfg(test)]
pub(crate) const ABORT_EXIT_CODE: i32 = 86;

static LIVE_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

/// Number of guarded regions currently mapped by this process.
pub fn live_allocations() -> usize {
    LIVE_ALLOCATIONS.load(Ordering::Acquire)
}

/// Resolves the page size and draws the canary ahead of the first allocation.
///
/// Calling it is optional; [`SecretBuffer::allocate`] does the same lazily.
pub fn prepare() -> Result<(), AllocError> {
    page_size()?;
    canary()?;

    Ok(())
}

/// A guard-paged, canary-checked region holding `len` secret bytes.
///
/// Created in [`AccessMode::ReadWrite`] and filled with [`GARBAGE_BYTE`].
/// Dropping the handle frees it like [`SecretBuffer::free`]. `Drop` cannot report
/// errors, so it aborts the process if the canary or the header were corrupted, or
/// if the region could not be made writable again for zeroization.
pub struct SecretBuffer {
    mapping: Mapping,
    page: usize,
    unprotected_size: usize,
    len: usize,
    mode: AccessMode,
}

// Safety: the mapping is exclusively owned; mutation and protection changes require &mut.
unsafe impl Send for SecretBuffer {}
unsafe impl Sync for SecretBuffer {}

impl SecretBuffer {
    fn abort() -> ! {
        #[cfg(test)]
        std::process::exit(ABORT_EXIT_CODE);

        #[cfg(not(test))]
        unsafe {
            libc::abort()
        }
    }

    /// Allocates a guarded region for `size` bytes.
    ///
    /// Fails with [`AllocError::Allocation`] if `size` is too close to
    /// `usize::MAX` to lay out, or if `mmap` or any setup `mprotect` fails, and with
    /// [`AllocError::Entropy`] if the process canary cannot be drawn. `mlock` and
    /// `MADV_DONTDUMP` are best-effort.
    ///
    /// `size == 0` is valid: the data pointer then sits on the trailing guard page.
    pub fn allocate(size: usize) -> Result<Self, AllocError> {
        let page = page_size()?;
        let canary = canary()?;

        if size >= usize::MAX - page * 4 {
            return Err(AllocError::Allocation);
        }

        let unprotected_size = page_round(CANARY_SIZE + size, page);
        let total_size = unprotected_size
            .checked_add(page * 3)
            .ok_or(AllocError::Allocation)?;

        let mapping = Mapping::new(total_size)?;

        let buffer = Self {
            mapping,
            page,
            unprotected_size,
            len: size,
            mode: AccessMode::ReadWrite,
        };

        if let Err(e) = buffer.setup(canary) {
            buffer.mapping.unmap();
            // Never counted, so never released.
            core::mem::forget(buffer);
            return Err(e);
        }

        LIVE_ALLOCATIONS.fetch_add(1, Ordering::AcqRel);

        Ok(buffer)
    }

    /// Allocates a guarded region for `count` elements of `size` bytes each.
    ///
    /// Fails with [`AllocError::Overflow`] if `count * size` overflows.
    pub fn allocate_array(count: usize, size: usize) -> Result<Self, AllocError> {
        let total = count.checked_mul(size).ok_or(AllocError::Overflow)?;

        Self::allocate(total)
    }

    fn setup(&self, canary: &[u8; CANARY_SIZE]) -> Result<(), AllocError> {
        let page = self.page;
        let unprotected_offset = page * 2;

        self.mapping
            .protect(page, page, AccessMode::NoAccess)
            .map_err(|_| AllocError::Allocation)?;
        self.mapping
            .protect(unprotected_offset + self.unprotected_size, page, AccessMode::NoAccess)
            .map_err(|_| AllocError::Allocation)?;

        self.mapping.lock(unprotected_offset, self.unprotected_size);
        self.mapping.dont_dump(unprotected_offset, self.unprotected_size);

        unsafe {
            ptr::copy_nonoverlapping(canary.as_ptr(), self.canary_ptr(), CANARY_SIZE);
            ptr::write(self.mapping.base() as *mut usize, self.unprotected_size);
            ptr::write_bytes(self.data_ptr(), GARBAGE_BYTE, self.len);
        }

        self.mapping
            .protect(0, page, AccessMode::ReadOnly)
            .map_err(|_| AllocError::Allocation)?;

        Ok(())
    }

    #[inline(always)]
    fn unprotected_offset(&self) -> usize {
        self.page * 2
    }

    #[inline(always)]
    fn canary_offset(&self) -> usize {
        self.unprotected_offset() + self.unprotected_size - (self.len + CANARY_SIZE)
    }

    #[inline(always)]
    fn canary_ptr(&self) -> *mut u8 {
        unsafe { self.mapping.base().add(self.canary_offset()) }
    }

    #[inline(always)]
    fn data_ptr(&self) -> *mut u8 {
        unsafe { self.mapping.base().add(self.canary_offset() + CANARY_SIZE) }
    }

    /// Number of usable bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds zero bytes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current protection mode of the data pages.
    #[inline(always)]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    // =========================================================================
    // Protection
    // =========================================================================

    fn set_mode(&mut self, mode: AccessMode) -> Result<(), AllocError> {
        self.mapping
            .protect(self.unprotected_offset(), self.unprotected_size, mode)?;
        self.mode = mode;

        Ok(())
    }

    /// Makes the data pages inaccessible. Any access through a raw pointer faults.
    ///
    /// On failure the recorded mode is unchanged.
    pub fn mprotect_noaccess(&mut self) -> Result<(), AllocError> {
        self.set_mode(AccessMode::NoAccess)
    }

    /// Makes the data pages read-only.
    ///
    /// On failure the recorded mode is unchanged.
    pub fn mprotect_readonly(&mut self) -> Result<(), AllocError> {
        self.set_mode(AccessMode::ReadOnly)
    }

    /// Makes the data pages readable and writable.
    ///
    /// On failure the recorded mode is unchanged.
    pub fn mprotect_readwrite(&mut self) -> Result<(), AllocError> {
        self.set_mode(AccessMode::ReadWrite)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Calls `f` with the data if the current mode allows reading.
    ///
    /// Fails with [`AllocError::AccessDenied`] in [`AccessMode::NoAccess`].
    pub fn open<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Result<R, AllocError> {
        if !self.mode.can_read() {
            return Err(AllocError::AccessDenied(self.mode));
        }

        let data = unsafe { core::slice::from_raw_parts(self.data_ptr(), self.len) };

        Ok(f(data))
    }

    /// Calls `f` with mutable data if the current mode allows writing.
    ///
    /// Fails with [`AllocError::AccessDenied`] unless in [`AccessMode::ReadWrite`].
    pub fn open_mut<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, AllocError> {
        if !self.mode.can_write() {
            return Err(AllocError::AccessDenied(self.mode));
        }

        let data = unsafe { core::slice::from_raw_parts_mut(self.data_ptr(), self.len) };

        Ok(f(data))
    }

    /// Raw pointer to the first data byte, for FFI.
    ///
    /// Dereferencing it is only sound within `len` bytes and under a mode that
    /// permits the access; otherwise the process faults.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.data_ptr()
    }

    /// Mutable raw pointer to the first data byte, for FFI.
    ///
    /// Same caveats as [`SecretBuffer::as_ptr`]. Writing below the data corrupts
    /// the canary; writing past `len` faults on the guard page.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data_ptr()
    }

    // =========================================================================
    // Integrity
    // =========================================================================

    fn canary_intact(&self) -> bool {
        let Ok(expected) = canary() else {
            return false;
        };
        let stored = unsafe { core::slice::from_raw_parts(self.canary_ptr(), CANARY_SIZE) };

        memcmp_ct(stored, expected)
    }

    fn header_intact(&self) -> bool {
        let recorded = unsafe { ptr::read_volatile(self.mapping.base() as *const usize) };
        recorded == self.unprotected_size
    }

    /// Checks the canary and the header page without freeing.
    ///
    /// Fails with [`AllocError::AccessDenied`] in [`AccessMode::NoAccess`], since
    /// the canary shares the data pages' protection, and with
    /// [`AllocError::IntegrityViolation`] if either check fails.
    pub fn verify_canary(&self) -> Result<(), AllocError> {
        if !self.mode.can_read() {
            return Err(AllocError::AccessDenied(self.mode));
        }

        if !(self.canary_intact() && self.header_intact()) {
            return Err(AllocError::IntegrityViolation);
        }

        Ok(())
    }

    // =========================================================================
    // Release
    // =========================================================================

    /// Verifies integrity, zeroizes and unmaps the region.
    ///
    /// The pages are released even when an error is returned:
    /// - [`AllocError::IntegrityViolation`] if the canary or header were corrupted
    ///   (the data is still zeroized first).
    /// - [`AllocError::Protection`] if the region could not be made writable again;
    ///   it is unmapped without zeroization.
    pub fn free(self) -> Result<(), AllocError> {
        let mut this = ManuallyDrop::new(self);
        this.release()
    }

    fn release(&mut self) -> Result<(), AllocError> {
        let offset = self.unprotected_offset();
        let size = self.unprotected_size;

        let writable = self.set_mode(AccessMode::ReadWrite);

        let intact = writable.is_ok() && self.canary_intact() && self.header_intact();

        if writable.is_ok() {
            let region = unsafe { core::slice::from_raw_parts_mut(self.mapping.base().add(offset), size) };
            memzero(region);
        }

        self.mapping.munlock(offset, size);
        self.mapping.unmap();
        LIVE_ALLOCATIONS.fetch_sub(1, Ordering::AcqRel);

        writable?;

        if !intact {
            return Err(AllocError::IntegrityViolation);
        }

        Ok(())
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        if self.release().is_err() {
            Self::abort();
        }
    }
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.len)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
