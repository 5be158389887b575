// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Guarded allocations for secret material.
//!
//! A [`SecretBuffer`] owns a dedicated `mmap` region laid out as
//!
//! ```text
//! [header][guard][padding | canary | user data][guard]
//! ```
//!
//! - **Guard pages** are `PROT_NONE` for the buffer's whole lifetime. The user
//!   data ends exactly where the trailing guard page starts, so writing one byte
//!   past the end faults immediately.
//! - **Canary**: 16 random bytes, drawn once per process, sit right before the
//!   user data. An underflow that reaches them is detected on free.
//! - **Header page** is read-only and records the size of the unprotected region;
//!   it is cross-checked against the handle on free.
//! - The unprotected region is `mlock`ed (best-effort) and excluded from core
//!   dumps on Linux.
//! - Fresh buffers are filled with `0xdb` so reads of uninitialized secrets are
//!   recognizable; freed buffers are zeroized before unmapping.
//!
//! Protection is toggled explicitly with [`SecretBuffer::mprotect_noaccess`],
//! [`SecretBuffer::mprotect_readonly`] and [`SecretBuffer::mprotect_readwrite`].
//! The safe accessors [`SecretBuffer::open`] and [`SecretBuffer::open_mut`] check
//! the current mode and return [`AllocError::AccessDenied`] instead of faulting.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(unix)]
//! # fn example() -> Result<(), sodalite_buffer::AllocError> {
//! use sodalite_buffer::SecretBuffer;
//!
//! let mut key = SecretBuffer::allocate(32)?;
//!
//! key.open_mut(|bytes| bytes.fill(0x42))?;
//! key.mprotect_noaccess()?;
//!
//! // ... later
//! key.mprotect_readonly()?;
//! let first = key.open(|bytes| bytes[0])?;
//! assert_eq!(first, 0x42);
//!
//! key.free()?;
//! # Ok(())
//! # }
//! # #[cfg(unix)]
//! # example().expect("Failed to example()");
//! ```
//!
//! The guarded allocator is Unix-only; [`AllocError`] and [`AccessMode`] are
//! available everywhere.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

#[cfg(unix)]
mod canary;
#[cfg(unix)]
mod page;
#[cfg(unix)]
mod secret_buffer;

mod error;
mod mode;

#[cfg(unix)]
pub use canary::CANARY_SIZE;
#[cfg(unix)]
pub use page::page_size;
#[cfg(unix)]
pub use secret_buffer::{GARBAGE_BYTE, SecretBuffer, live_allocations, prepare};

pub use error::AllocError;
pub use mode::AccessMode;
