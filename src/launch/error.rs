//! Uniform fatal error for the launch pipeline.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Any failure on the way to the exec transition.
///
/// Every variant is terminal: the caller reports it once and exits
/// non-zero. Nothing is retried and nothing is downgraded to a warning,
/// because every cause is either a bad request or an environment
/// inconsistency a retry could not fix without changing the process's
/// security posture.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The requested program matched nothing on the search path.
    #[error("could not find executable {program:?}")]
    ExecutableNotFound {
        program: OsString,
        #[source]
        source: which::Error,
    },

    /// The resolved location could not be turned into an absolute,
    /// symlink-free path. It may have vanished between resolution steps.
    #[error("could not canonicalize path {}", path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The working directory is gone, likely deleted under the process.
    #[error("could not determine the working directory")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },

    /// An argv or environment string holds an interior NUL and cannot
    /// cross the exec boundary.
    #[error("{what} contains an interior NUL byte")]
    NulByte {
        what: String,
        #[source]
        source: std::ffi::NulError,
    },

    /// The exec into the trusted executor itself failed. There is no
    /// fallback execution path.
    #[error("could not invoke {executor}")]
    ExecutorInvocation {
        executor: &'static str,
        #[source]
        source: nix::errno::Errno,
    },
}
