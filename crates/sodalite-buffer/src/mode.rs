// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Protection mode of a guarded buffer's data pages.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AccessMode {
    /// `PROT_NONE`: any access faults.
    NoAccess,
    /// `PROT_READ`: reads allowed, writes fault.
    ReadOnly,
    /// `PROT_READ | PROT_WRITE`.
    ReadWrite,
}

impl AccessMode {
    /// Whether the data can be read in this mode.
    #[inline(always)]
    pub const fn can_read(self) -> bool {
        !matches!(self, AccessMode::NoAccess)
    }

    /// Whether the data can be written in this mode.
    #[inline(always)]
    pub const fn can_write(self) -> bool {
        matches!(self, AccessMode::ReadWrite)
    }

    #[cfg(unix)]
    pub(crate) const fn prot(self) -> libc::c_int {
        match self {
            AccessMode::NoAccess => libc::PROT_NONE,
            AccessMode::ReadOnly => libc::PROT_READ,
            AccessMode::ReadWrite => libc::PROT_READ | libc::PROT_WRITE,
        }
    }
}
