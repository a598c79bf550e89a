// SPDX-License-Identifier: MIT

//! Process-image replacement into the trusted executor.

use std::convert::Infallible;
use std::ffi::CStr;

use crate::launch::error::LaunchError;
use crate::launch::invocation::{EXECUTOR, ExecutorInvocation};

/// Replace the current process with the executor.
///
/// This execs in place rather than forking: a fork-and-wait model would
/// leave a window with two processes of differing privilege posture, which
/// is exactly the ambiguity the launcher exists to avoid.
///
/// The inherited environment is empty. Caller variables travel only as the
/// explicit `--setenv` directives already baked into the invocation, so the
/// executor's own environment can neither leak into nor be confused with
/// the target program's requested environment.
///
/// Returns only on failure; the success type is uninhabited because on
/// success this program no longer exists.
pub(crate) fn replace(invocation: &ExecutorInvocation) -> Result<Infallible, LaunchError> {
    let argv = invocation.exec_argv()?;
    tracing::debug!(executor = EXECUTOR, argv_len = argv.len(), "replacing process image");
    let env: [&CStr; 0] = [];
    nix::unistd::execve(argv[0].as_c_str(), &argv, &env).map_err(|source| {
        LaunchError::ExecutorInvocation {
            executor: EXECUTOR,
            source,
        }
    })
}
