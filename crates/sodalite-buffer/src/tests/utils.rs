// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for sodalite-buffer.

use std::process::ExitStatus;

/// Check if seccomp is available by forking a child process that attempts to load a filter.
/// Returns false if running under QEMU or seccomp is unavailable.
pub fn is_seccomp_available() -> bool {
    use libseccomp::{ScmpAction, ScmpFilterContext};

    match unsafe { libc::fork() } {
        -1 => false,
        0 => {
            let result =
                ScmpFilterContext::new(ScmpAction::Allow).and_then(|filter| filter.load());

            std::process::exit(if result.is_ok() { 0 } else { 1 });
        }
        child_pid => {
            let mut status: libc::c_int = 0;
            unsafe {
                libc::waitpid(child_pid, &mut status, 0);
            }

            libc::WIFEXITED(status) && libc::WEXITSTATUS(status) == 0
        }
    }
}

/// Runs an ignored test as a subprocess and returns how it terminated.
pub fn run_test_as_subprocess_status(test_name: &str) -> ExitStatus {
    let exe = std::env::current_exe().expect("Failed to current_exe()");

    std::process::Command::new(exe)
        .args([
            "--exact",
            test_name,
            "--ignored",
            "--test-threads=1",
            "--nocapture",
        ])
        .status()
        .expect("Failed to run subprocess")
}

/// Runs an ignored test as a subprocess and returns its exit code.
pub fn run_test_as_subprocess(test_name: &str) -> Option<i32> {
    run_test_as_subprocess_status(test_name).code()
}

/// Asserts that the subprocess was killed by a memory access fault.
pub fn assert_killed_by_fault(status: ExitStatus) {
    use std::os::unix::process::ExitStatusExt;

    let signal = status.signal();
    assert!(
        signal == Some(libc::SIGSEGV) || signal == Some(libc::SIGBUS),
        "expected SIGSEGV or SIGBUS, got {status:?}"
    );
}

fn block_syscall(name: &str) {
    use libseccomp::{ScmpAction, ScmpFilterContext, ScmpSyscall};

    let mut filter = ScmpFilterContext::new(ScmpAction::Allow).expect("Failed to create filter");
    filter
        .add_rule(
            ScmpAction::Errno(libc::EPERM),
            ScmpSyscall::from_name(name).expect("Failed to from_name(..)"),
        )
        .expect("Failed to add rule");
    filter.load().expect("Failed to load seccomp filter");
}

pub fn block_mprotect() {
    block_syscall("mprotect");
}
