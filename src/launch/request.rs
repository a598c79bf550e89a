// SPDX-License-Identifier: MIT

//! The parsed launch request and the one-time caller snapshot.

use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::launch::error::LaunchError;
use crate::launch::identity::RealIdentity;
use crate::policy::IsolationLevel;

/// What the caller asked to run. Immutable once parsed, consumed once.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Program name or path, resolved against the search path.
    pub program: OsString,
    /// Arguments passed through verbatim and in order.
    pub args: Vec<OsString>,
    pub isolation: IsolationLevel,
    /// Whether the spawned program attaches the caller's terminal.
    pub attach_tty: bool,
}

/// Ambient process state captured once at pipeline start.
///
/// The working directory and environment are snapshotted here and threaded
/// through as immutable values; nothing downstream re-reads process
/// globals. The environment keeps every variable verbatim, sorted by name
/// so directive assembly is deterministic.
#[derive(Debug, Clone)]
pub struct CallerContext {
    identity: RealIdentity,
    cwd: PathBuf,
    env: BTreeMap<OsString, OsString>,
}

impl CallerContext {
    /// Snapshot the real identity, working directory, and full environment
    /// of the current process.
    pub fn capture() -> Result<CallerContext, LaunchError> {
        let cwd =
            env::current_dir().map_err(|source| LaunchError::WorkingDirectory { source })?;
        Ok(CallerContext {
            identity: RealIdentity::capture(),
            cwd,
            env: env::vars_os().collect(),
        })
    }

    /// Snapshot with an injected working directory and environment, for
    /// exercising the pipeline against fixtures. The identity is still
    /// captured from the process; it is never injectable.
    pub fn with_ambient(cwd: PathBuf, env: BTreeMap<OsString, OsString>) -> CallerContext {
        CallerContext {
            identity: RealIdentity::capture(),
            cwd,
            env,
        }
    }

    pub fn identity(&self) -> RealIdentity {
        self.identity
    }

    pub fn working_directory(&self) -> &Path {
        &self.cwd
    }

    pub fn environment(&self) -> &BTreeMap<OsString, OsString> {
        &self.env
    }

    /// The snapshot's search path, if any. Target resolution uses this
    /// rather than re-reading the ambient PATH.
    pub(crate) fn search_path(&self) -> Option<&OsStr> {
        self.env.get(OsStr::new("PATH")).map(OsString::as_os_str)
    }
}
