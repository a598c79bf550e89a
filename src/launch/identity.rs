// SPDX-License-Identifier: MIT

//! Real caller identity.

use nix::unistd::{Gid, Uid};

/// The real uid/gid of the user who invoked this program.
///
/// When installed setuid-root the process runs with an elevated *effective*
/// identity, but the spawned program must only ever run as the caller. This
/// type reads the real ids from the kernel and deliberately has no
/// constructor taking numbers, so no flag, environment variable, or other
/// caller input can ever become the launch identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealIdentity {
    uid: Uid,
    gid: Gid,
}

impl RealIdentity {
    /// Read the real (not effective) ids of the current process. Cannot
    /// fail: the kernel always knows who owns a process.
    pub fn capture() -> RealIdentity {
        RealIdentity {
            uid: Uid::current(),
            gid: Gid::current(),
        }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn gid(&self) -> Gid {
        self.gid
    }
}
