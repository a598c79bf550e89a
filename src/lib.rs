//! # sdcage
//!
//! The library behind a setuid-capable launcher that hands programs to the
//! systemd service manager inside a confined scope.
//!
//! The binary may be installed setuid-root so unprivileged users can reach
//! the service manager, which makes one invariant load-bearing for the whole
//! crate: the spawned program always runs as the *real* identity of the
//! invoking user, never the elevated effective identity and never anything
//! supplied through flags or environment variables.

pub mod launch;
pub mod policy;

pub use launch::{
    CallerContext, ExecutorInvocation, LaunchError, LaunchRequest, RealIdentity, launch, plan,
};
pub use policy::{IsolationLevel, IsolationPolicy};
