// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use serial_test::serial;

use crate::error::AllocError;
use crate::mode::AccessMode;
use crate::page::page_size;
use crate::secret_buffer::{GARBAGE_BYTE, SecretBuffer, live_allocations, prepare};

fn corrupt_canary(buffer: &mut SecretBuffer) {
    unsafe {
        let last_canary_byte = buffer.as_mut_ptr().sub(1);
        last_canary_byte.write_volatile(last_canary_byte.read_volatile() ^ 0x01);
    }
}

// =============================================================================
// allocate()
// =============================================================================

#[test]
#[serial(buffer)]
fn test_allocate_fills_garbage() {
    let buffer = SecretBuffer::allocate(100).expect("Failed to allocate(..)");

    assert_eq!(buffer.len(), 100);
    assert_eq!(buffer.mode(), AccessMode::ReadWrite);
    buffer
        .open(|bytes| assert!(bytes.iter().all(|&b| b == GARBAGE_BYTE)))
        .expect("Failed to open(..)");
}

#[test]
#[serial(buffer)]
fn test_allocate_data_ends_on_page_boundary() {
    let page = page_size().expect("Failed to page_size()");

    for size in [1, 15, 16, 17, page - 16, page - 15, page, page + 1, 3 * page] {
        let buffer = SecretBuffer::allocate(size).expect("Failed to allocate(..)");
        let end = buffer.as_ptr() as usize + buffer.len();

        assert_eq!(end % page, 0, "size={size}");
    }
}

#[test]
#[serial(buffer)]
fn test_allocate_zero_bytes() {
    let buffer = SecretBuffer::allocate(0).expect("Failed to allocate(..)");

    assert!(buffer.is_empty());
    assert_eq!(buffer.open(|bytes| bytes.len()), Ok(0));
    buffer.verify_canary().expect("Failed to verify_canary()");
    buffer.free().expect("Failed to free()");
}

#[test]
#[serial(buffer)]
fn test_allocate_rejects_sizes_near_usize_max() {
    let page = page_size().expect("Failed to page_size()");

    for size in [usize::MAX, usize::MAX - page * 4] {
        assert_eq!(SecretBuffer::allocate(size).map(|_| ()), Err(AllocError::Allocation));
    }
}

#[test]
#[serial(buffer)]
fn test_allocate_reports_mmap_failure() {
    let page = page_size().expect("Failed to page_size()");
    let before = live_allocations();

    // Passes the layout check but cannot be mapped.
    let result = SecretBuffer::allocate(usize::MAX - page * 8);

    assert_eq!(result.map(|_| ()), Err(AllocError::Allocation));
    assert_eq!(live_allocations(), before);
}

#[test]
#[serial(buffer)]
fn test_prepare_is_idempotent() {
    prepare().expect("Failed to prepare()");
    prepare().expect("Failed to prepare()");
}

// =============================================================================
// allocate_array()
// =============================================================================

#[test]
#[serial(buffer)]
fn test_allocate_array() {
    let buffer = SecretBuffer::allocate_array(4, 8).expect("Failed to allocate_array(..)");
    assert_eq!(buffer.len(), 32);
}

#[test]
#[serial(buffer)]
fn test_allocate_array_overflow() {
    assert_eq!(
        SecretBuffer::allocate_array(usize::MAX / 2 + 1, 2).map(|_| ()),
        Err(AllocError::Overflow)
    );
    assert_eq!(
        SecretBuffer::allocate_array(usize::MAX, usize::MAX).map(|_| ()),
        Err(AllocError::Overflow)
    );
}

// =============================================================================
// mprotect_*() / open()
// =============================================================================

#[test]
#[serial(buffer)]
fn test_open_mut_then_open() {
    let mut buffer = SecretBuffer::allocate(4).expect("Failed to allocate(..)");

    buffer
        .open_mut(|bytes| bytes.copy_from_slice(&[1, 2, 3, 4]))
        .expect("Failed to open_mut(..)");
    let sum = buffer
        .open(|bytes| bytes.iter().map(|&b| b as u32).sum::<u32>())
        .expect("Failed to open(..)");

    assert_eq!(sum, 10);
}

#[test]
#[serial(buffer)]
fn test_noaccess_denies_open() {
    let mut buffer = SecretBuffer::allocate(16).expect("Failed to allocate(..)");
    buffer.mprotect_noaccess().expect("Failed to mprotect_noaccess()");

    assert_eq!(buffer.mode(), AccessMode::NoAccess);
    assert_eq!(buffer.open(|_| ()), Err(AllocError::AccessDenied(AccessMode::NoAccess)));
    assert_eq!(buffer.open_mut(|_| ()), Err(AllocError::AccessDenied(AccessMode::NoAccess)));
    assert_eq!(
        buffer.verify_canary(),
        Err(AllocError::AccessDenied(AccessMode::NoAccess))
    );
}

#[test]
#[serial(buffer)]
fn test_readonly_allows_reads_only() {
    let mut buffer = SecretBuffer::allocate(16).expect("Failed to allocate(..)");
    buffer.open_mut(|bytes| bytes[0] = 7).expect("Failed to open_mut(..)");
    buffer.mprotect_readonly().expect("Failed to mprotect_readonly()");

    assert_eq!(buffer.open(|bytes| bytes[0]), Ok(7));
    assert_eq!(buffer.open_mut(|_| ()), Err(AllocError::AccessDenied(AccessMode::ReadOnly)));
}

#[test]
#[serial(buffer)]
fn test_mode_round_trip_preserves_data() {
    let mut buffer = SecretBuffer::allocate(64).expect("Failed to allocate(..)");
    buffer.open_mut(|bytes| bytes.fill(0x42)).expect("Failed to open_mut(..)");

    buffer.mprotect_noaccess().expect("Failed to mprotect_noaccess()");
    buffer.mprotect_readwrite().expect("Failed to mprotect_readwrite()");

    buffer
        .open(|bytes| assert!(bytes.iter().all(|&b| b == 0x42)))
        .expect("Failed to open(..)");
}

// =============================================================================
// free() / Drop
// =============================================================================

#[test]
#[serial(buffer)]
fn test_free_from_noaccess() {
    let mut buffer = SecretBuffer::allocate(32).expect("Failed to allocate(..)");
    buffer.mprotect_noaccess().expect("Failed to mprotect_noaccess()");

    buffer.free().expect("Failed to free()");
}

#[test]
#[serial(buffer)]
fn test_free_detects_corrupted_canary() {
    let before = live_allocations();
    let mut buffer = SecretBuffer::allocate(32).expect("Failed to allocate(..)");

    corrupt_canary(&mut buffer);

    assert_eq!(buffer.verify_canary(), Err(AllocError::IntegrityViolation));
    assert_eq!(buffer.free(), Err(AllocError::IntegrityViolation));
    // Pages are released even on integrity failure.
    assert_eq!(live_allocations(), before);
}

#[test]
#[serial(buffer)]
fn test_live_allocations_tracks_drop_and_free() {
    let before = live_allocations();

    let a = SecretBuffer::allocate(8).expect("Failed to allocate(..)");
    let b = SecretBuffer::allocate(8).expect("Failed to allocate(..)");
    let c = SecretBuffer::allocate(8).expect("Failed to allocate(..)");
    assert_eq!(live_allocations(), before + 3);

    drop(a);
    b.free().expect("Failed to free()");
    assert_eq!(live_allocations(), before + 1);

    drop(c);
    assert_eq!(live_allocations(), before);
}

#[test]
#[serial(buffer)]
fn test_concurrent_allocations() {
    use std::thread;

    let before = live_allocations();

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            thread::spawn(move || {
                let mut buffer = SecretBuffer::allocate(64).expect("Failed to allocate(..)");
                buffer.open_mut(|bytes| bytes.fill(i)).expect("Failed to open_mut(..)");
                buffer.verify_canary().expect("Failed to verify_canary()");
                buffer.free().expect("Failed to free()");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Failed to join()");
    }

    assert_eq!(live_allocations(), before);
}

#[test]
#[serial(buffer)]
fn test_debug_redacts_contents() {
    let mut buffer = SecretBuffer::allocate(4).expect("Failed to allocate(..)");
    buffer.open_mut(|bytes| bytes.copy_from_slice(b"pwd!")).expect("Failed to open_mut(..)");

    let debug = format!("{buffer:?}");

    assert!(debug.contains("len: 4"));
    assert!(debug.contains("ReadWrite"));
    assert!(!debug.contains("pwd!"));
    assert!(!debug.contains("112"));
}

#[test]
fn test_secret_buffer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SecretBuffer>();
}

// =============================================================================
// Faults and aborts (subprocess)
// =============================================================================

#[cfg(target_os = "linux")]
mod faults {
    use super::*;
    use crate::secret_buffer::ABORT_EXIT_CODE;
    use crate::tests::utils::{
        assert_killed_by_fault, block_mprotect, is_seccomp_available, run_test_as_subprocess,
        run_test_as_subprocess_status,
    };

    #[test]
    #[ignore]
    fn subprocess_test_overflow_faults() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");
        let len = buffer.len();

        unsafe { buffer.as_mut_ptr().add(len).write_volatile(0) };

        // Unreachable: the write above lands on the trailing guard page.
        std::process::exit(0);
    }

    #[test]
    #[serial(buffer)]
    fn test_overflow_faults() {
        let status =
            run_test_as_subprocess_status("tests::secret_buffer::faults::subprocess_test_overflow_faults");
        assert_killed_by_fault(status);
    }

    #[test]
    #[ignore]
    fn subprocess_test_read_under_noaccess_faults() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");
        buffer.mprotect_noaccess().expect("Failed to mprotect_noaccess()");

        let byte = unsafe { buffer.as_ptr().read_volatile() };

        std::process::exit(byte as i32);
    }

    #[test]
    #[serial(buffer)]
    fn test_read_under_noaccess_faults() {
        let status = run_test_as_subprocess_status(
            "tests::secret_buffer::faults::subprocess_test_read_under_noaccess_faults",
        );
        assert_killed_by_fault(status);
    }

    #[test]
    #[ignore]
    fn subprocess_test_write_under_readonly_faults() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");
        buffer.mprotect_readonly().expect("Failed to mprotect_readonly()");

        unsafe { buffer.as_mut_ptr().write_volatile(1) };

        std::process::exit(0);
    }

    #[test]
    #[serial(buffer)]
    fn test_write_under_readonly_faults() {
        let status = run_test_as_subprocess_status(
            "tests::secret_buffer::faults::subprocess_test_write_under_readonly_faults",
        );
        assert_killed_by_fault(status);
    }

    #[test]
    #[ignore]
    fn subprocess_test_drop_with_corrupted_canary_aborts() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");
        corrupt_canary(&mut buffer);

        drop(buffer);

        std::process::exit(0);
    }

    #[test]
    #[serial(buffer)]
    fn test_drop_with_corrupted_canary_aborts() {
        let exit_code = run_test_as_subprocess(
            "tests::secret_buffer::faults::subprocess_test_drop_with_corrupted_canary_aborts",
        );
        assert_eq!(exit_code, Some(ABORT_EXIT_CODE));
    }

    #[test]
    #[ignore]
    fn subprocess_test_drop_with_mprotect_blocked_aborts() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");
        buffer.mprotect_readonly().expect("Failed to mprotect_readonly()");

        block_mprotect();

        // Cannot be made writable again, so it cannot be wiped.
        drop(buffer);

        std::process::exit(0);
    }

    #[test]
    #[serial(buffer)]
    fn test_drop_with_mprotect_blocked_aborts() {
        if !is_seccomp_available() {
            eprintln!("seccomp unavailable, skipping");
            return;
        }

        let exit_code = run_test_as_subprocess(
            "tests::secret_buffer::faults::subprocess_test_drop_with_mprotect_blocked_aborts",
        );
        assert_eq!(exit_code, Some(ABORT_EXIT_CODE));
    }

    #[test]
    #[ignore]
    fn subprocess_test_mprotect_blocked() {
        let mut buffer = SecretBuffer::allocate(24).expect("Failed to allocate(..)");

        block_mprotect();

        assert_eq!(buffer.mprotect_noaccess(), Err(AllocError::Protection));
        assert_eq!(buffer.mode(), AccessMode::ReadWrite);
        assert_eq!(buffer.open(|bytes| bytes[0]), Ok(GARBAGE_BYTE));

        assert_eq!(SecretBuffer::allocate(24).map(|_| ()), Err(AllocError::Allocation));
        assert_eq!(buffer.free(), Err(AllocError::Protection));
    }

    #[test]
    #[serial(buffer)]
    fn test_mprotect_blocked() {
        if !is_seccomp_available() {
            eprintln!("seccomp unavailable, skipping");
            return;
        }

        let exit_code =
            run_test_as_subprocess("tests::secret_buffer::faults::subprocess_test_mprotect_blocked");
        assert_eq!(exit_code, Some(0), "Subprocess should exit cleanly after assertions");
    }
}
