// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mapping - Low-level anonymous mapping with protection primitives.
//!
//! Each syscall is exposed separately so the allocator can apply it to a
//! page-aligned sub-range (header, guards, data) and so failures can be tested in
//! isolation. Offsets and lengths passed to the methods must lie within the
//! mapping and be page-aligned.

use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AllocError;
use crate::mode::AccessMode;

static PAGE_SIZE: AtomicUsize = AtomicUsize::new(0);

/// Returns the system page size, resolved once via `sysconf(_SC_PAGESIZE)`.
///
/// Fails with [`AllocError::Allocation`] if the reported size is unusable (not a
/// power of two, or too small to hold the header).
pub fn page_size() -> Result<usize, AllocError> {
    let cached = PAGE_SIZE.load(Ordering::Relaxed);
    if cached != 0 {
        return Ok(cached);
    }

    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw <= 0 {
        return Err(AllocError::Allocation);
    }

    let size = raw as usize;
    if !size.is_power_of_two() || size < crate::canary::CANARY_SIZE + size_of::<usize>() {
        return Err(AllocError::Allocation);
    }

    // Racing initializers store the same value.
    PAGE_SIZE.store(size, Ordering::Relaxed);

    Ok(size)
}

/// Rounds `n` up to a multiple of `page`. `page` must be a power of two and the
/// result must not overflow.
#[inline(always)]
pub(crate) fn page_round(n: usize, page: usize) -> usize {
    (n + page - 1) & !(page - 1)
}

/// An anonymous private mapping. Not unmapped on drop: the owner calls
/// [`Mapping::unmap`] exactly once.
#[derive(Debug)]
pub(crate) struct Mapping {
    base: NonNull<u8>,
    len: usize,
}

impl Mapping {
    /// Maps `len` bytes readable and writable. Does NOT lock or protect.
    pub fn new(len: usize) -> Result<Self, AllocError> {
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(AllocError::Allocation);
        }

        let base = NonNull::new(ptr as *mut u8).ok_or(AllocError::Allocation)?;

        Ok(Self { base, len })
    }

    #[inline(always)]
    pub fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    #[inline(always)]
    fn at(&self, offset: usize, len: usize) -> *mut libc::c_void {
        debug_assert!(offset.checked_add(len).is_some_and(|end| end <= self.len));
        unsafe { self.base.as_ptr().add(offset) as *mut libc::c_void }
    }

    /// Applies `mode` to `[offset, offset + len)`.
    pub fn protect(&self, offset: usize, len: usize, mode: AccessMode) -> Result<(), AllocError> {
        let failed = unsafe { libc::mprotect(self.at(offset, len), len, mode.prot()) } != 0;

        if failed {
            return Err(AllocError::Protection);
        }

        Ok(())
    }

    /// Locks `[offset, offset + len)` in RAM. Returns `false` if `mlock` failed
    /// (typically `RLIMIT_MEMLOCK`).
    pub fn lock(&self, offset: usize, len: usize) -> bool {
        unsafe { libc::mlock(self.at(offset, len) as *const _, len) == 0 }
    }

    /// Unlocks `[offset, offset + len)`. Unlocking an unlocked range is a no-op.
    pub fn munlock(&self, offset: usize, len: usize) {
        unsafe { libc::munlock(self.at(offset, len) as *const _, len) };
    }

    /// Excludes `[offset, offset + len)` from core dumps (best-effort, Linux only).
    pub fn dont_dump(&self, offset: usize, len: usize) {
        #[cfg(target_os = "linux")]
        unsafe {
            libc::madvise(self.at(offset, len), len, libc::MADV_DONTDUMP);
        }

        #[cfg(not(target_os = "linux"))]
        let _ = (offset, len);
    }

    /// Unmaps the whole mapping.
    pub fn unmap(&self) {
        unsafe { libc::munmap(self.base.as_ptr() as *mut libc::c_void, self.len) };
    }
}
