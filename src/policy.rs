// SPDX-License-Identifier: MIT

//! Isolation presets handed to the service manager.
//!
//! Restrictions are a closed, audited table keyed by [`IsolationLevel`]
//! rather than free-form caller flags, so the set of requestable directives
//! stays bounded and reviewable. Levels are additive: every stricter level
//! carries all directives of the more relaxed ones.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Memory ceiling applied to every launch.
///
/// A percentage of available memory rather than an absolute figure, so the
/// same preset is usable across machines. A CPU quota would sit next to it
/// once per-scope CPU accounting behaves with fractional quotas.
pub const MEMORY_MAX: &str = "70%";

pub const MEMORY_MAX_PROPERTY: &str = "MemoryMax";
pub const WORKING_DIRECTORY_PROPERTY: &str = "WorkingDirectory";
pub const NO_NEW_PRIVILEGES_PROPERTY: &str = "NoNewPrivileges";
pub const PRIVATE_TMP_PROPERTY: &str = "PrivateTmp";

/// How confined the spawned program is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsolationLevel {
    /// Resource limits plus privilege and /tmp restrictions. The default.
    #[default]
    Strict,
    /// Resource limits only.
    Relaxed,
}

/// An isolation level string that names no known preset.
#[derive(Debug, Clone, Error)]
#[error("unsupported isolation level {0:?}, expected \"strict\" or \"relaxed\"")]
pub struct UnknownIsolationLevel(String);

impl FromStr for IsolationLevel {
    type Err = UnknownIsolationLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(IsolationLevel::Strict),
            "relaxed" => Ok(IsolationLevel::Relaxed),
            other => Err(UnknownIsolationLevel(other.to_owned())),
        }
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IsolationLevel::Strict => "strict",
            IsolationLevel::Relaxed => "relaxed",
        })
    }
}

/// The directive set for one launch.
///
/// Property names come from the closed vocabulary above; values are
/// `OsString` so a non-UTF-8 working directory survives verbatim. Iteration
/// is in property-name order, which keeps the assembled command line
/// deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationPolicy {
    properties: BTreeMap<&'static str, OsString>,
}

impl IsolationPolicy {
    /// Build the preset for `level` with `working_directory` as the scope's
    /// working directory. Total over the enum, pure in its inputs.
    pub fn for_level(level: IsolationLevel, working_directory: &Path) -> IsolationPolicy {
        let mut properties = BTreeMap::new();
        properties.insert(MEMORY_MAX_PROPERTY, OsString::from(MEMORY_MAX));
        properties.insert(
            WORKING_DIRECTORY_PROPERTY,
            working_directory.as_os_str().to_os_string(),
        );
        if level == IsolationLevel::Strict {
            properties.insert(NO_NEW_PRIVILEGES_PROPERTY, OsString::from("yes"));
            properties.insert(PRIVATE_TMP_PROPERTY, OsString::from("yes"));
        }
        IsolationPolicy { properties }
    }

    pub fn get(&self, property: &str) -> Option<&OsStr> {
        self.properties.get(property).map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Directives in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OsStr)> {
        self.properties.iter().map(|(name, value)| (*name, value.as_os_str()))
    }

    /// True when every directive in `other` appears here with the same value.
    /// The audit invariant: stricter presets must be supersets.
    pub fn is_superset_of(&self, other: &IsolationPolicy) -> bool {
        other
            .properties
            .iter()
            .all(|(name, value)| self.properties.get(name) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxed_preset_is_exactly_memory_and_cwd() {
        let policy = IsolationPolicy::for_level(IsolationLevel::Relaxed, Path::new("/tmp/work"));
        assert_eq!(policy.len(), 2);
        assert_eq!(policy.get("MemoryMax"), Some(OsStr::new("70%")));
        assert_eq!(policy.get("WorkingDirectory"), Some(OsStr::new("/tmp/work")));
    }

    #[test]
    fn strict_preset_adds_privilege_and_tmp_restrictions() {
        let policy = IsolationPolicy::for_level(IsolationLevel::Strict, Path::new("/tmp/work"));
        assert_eq!(policy.len(), 4);
        assert_eq!(policy.get("MemoryMax"), Some(OsStr::new("70%")));
        assert_eq!(policy.get("WorkingDirectory"), Some(OsStr::new("/tmp/work")));
        assert_eq!(policy.get("NoNewPrivileges"), Some(OsStr::new("yes")));
        assert_eq!(policy.get("PrivateTmp"), Some(OsStr::new("yes")));
    }

    #[test]
    fn strict_is_a_strict_superset_of_relaxed() {
        let cwd = Path::new("/var/empty");
        let strict = IsolationPolicy::for_level(IsolationLevel::Strict, cwd);
        let relaxed = IsolationPolicy::for_level(IsolationLevel::Relaxed, cwd);
        assert!(strict.is_superset_of(&relaxed));
        assert!(!relaxed.is_superset_of(&strict));
        assert!(strict.len() > relaxed.len());
    }

    #[test]
    fn iteration_is_sorted_by_property_name() {
        let policy = IsolationPolicy::for_level(IsolationLevel::Strict, Path::new("/"));
        let names: Vec<&str> = policy.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn level_parses_from_its_display_form() {
        assert_eq!("strict".parse::<IsolationLevel>().unwrap(), IsolationLevel::Strict);
        assert_eq!("relaxed".parse::<IsolationLevel>().unwrap(), IsolationLevel::Relaxed);
        assert_eq!(IsolationLevel::Strict.to_string(), "strict");
        assert_eq!(IsolationLevel::Relaxed.to_string(), "relaxed");
    }

    #[test]
    fn unknown_level_is_rejected_and_named() {
        let err = "bogus".parse::<IsolationLevel>().unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn default_level_is_strict() {
        assert_eq!(IsolationLevel::default(), IsolationLevel::Strict);
    }
}
