// SPDX-License-Identifier: MIT

//! Target resolution and executor command-line assembly.

use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt as _;
use std::path::PathBuf;

use crate::launch::error::LaunchError;
use crate::launch::request::{CallerContext, LaunchRequest};
use crate::policy::IsolationPolicy;

/// Absolute path of the trusted executor. Fixed at build time, never taken
/// from input, so a caller-controlled PATH cannot redirect the exec.
pub const EXECUTOR: &str = "/usr/bin/systemd-run";

/// The fully assembled command line for the trusted executor.
///
/// `argv[0]` is the executor itself, followed by the forced identity, the
/// quiet flag, the optional TTY flag, one `-p` directive per policy entry,
/// one `--setenv` directive per environment entry, then the canonical
/// target path and its arguments in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorInvocation {
    argv: Vec<OsString>,
}

impl ExecutorInvocation {
    pub(crate) fn assemble(
        request: &LaunchRequest,
        ctx: &CallerContext,
        policy: &IsolationPolicy,
        target: PathBuf,
    ) -> ExecutorInvocation {
        let identity = ctx.identity();
        let mut argv: Vec<OsString> = vec![
            EXECUTOR.into(),
            "--uid".into(),
            identity.uid().to_string().into(),
            "--gid".into(),
            identity.gid().to_string().into(),
            "--quiet".into(),
        ];
        if request.attach_tty {
            argv.push("--tty".into());
        }
        for (name, value) in policy.iter() {
            argv.push("-p".into());
            argv.push(directive(OsStr::new(name), value));
        }
        for (name, value) in ctx.environment() {
            argv.push("--setenv".into());
            argv.push(directive(name, value));
        }
        argv.push(target.into_os_string());
        argv.extend(request.args.iter().cloned());
        ExecutorInvocation { argv }
    }

    /// The assembled argv, `argv[0]` included.
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    /// Argv as NUL-terminated strings, ready for the exec boundary.
    pub(crate) fn exec_argv(&self) -> Result<Vec<CString>, LaunchError> {
        self.argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes()).map_err(|source| LaunchError::NulByte {
                    what: format!("argument {:?}", arg),
                    source,
                })
            })
            .collect()
    }
}

/// Resolve the requested program against the snapshot's search path, then
/// canonicalize to an absolute, symlink-free path. Both steps reject the
/// request before anything privilege-relevant happens.
pub(crate) fn resolve_target(
    request: &LaunchRequest,
    ctx: &CallerContext,
) -> Result<PathBuf, LaunchError> {
    let found = which::which_in(&request.program, ctx.search_path(), ctx.working_directory())
        .map_err(|source| LaunchError::ExecutableNotFound {
            program: request.program.clone(),
            source,
        })?;
    std::fs::canonicalize(&found)
        .map_err(|source| LaunchError::Canonicalize { path: found, source })
}

fn directive(name: &OsStr, value: &OsStr) -> OsString {
    let mut out = name.to_os_string();
    out.push("=");
    out.push(value);
    out
}
