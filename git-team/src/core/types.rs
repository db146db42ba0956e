//! Shared deterministic types for git-team core logic.
//!
//! These types define stable contracts between the policies, the state
//! repository and the config store. They do not depend on external state.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Whether git-team is activated for the whole user or only the current repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivationScope {
    #[default]
    Global,
    RepoLocal,
}

impl ActivationScope {
    /// The git config file that backs this activation scope.
    pub fn config_scope(self) -> ConfigScope {
        match self {
            ActivationScope::Global => ConfigScope::Global,
            ActivationScope::RepoLocal => ConfigScope::Local,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivationScope::Global => "global",
            ActivationScope::RepoLocal => "repo-local",
        }
    }
}

impl fmt::Display for ActivationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationScope {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "global" => Ok(ActivationScope::Global),
            "repo-local" => Ok(ActivationScope::RepoLocal),
            other => Err(anyhow!("unknown activation-scope '{other}'")),
        }
    }
}

/// Scope argument handed to `git config` (`--global` or `--local`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigScope {
    Global,
    Local,
}

impl ConfigScope {
    /// Command-line flag selecting this scope.
    pub fn flag(self) -> &'static str {
        match self {
            ConfigScope::Global => "--global",
            ConfigScope::Local => "--local",
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Global => f.write_str("global"),
            ConfigScope::Local => f.write_str("local"),
        }
    }
}

/// An alias together with the coauthor it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assignment {
    pub alias: String,
    pub coauthor: String,
}

/// Persisted activation state of git-team at one scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Disabled,
    Enabled {
        /// Active coauthors in the order they were persisted.
        coauthors: Vec<String>,
        /// `core.hooksPath` value that existed before git-team took it over.
        previous_hooks_path: String,
    },
}

impl ActivationState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ActivationState::Enabled { .. })
    }

    pub fn coauthors(&self) -> &[String] {
        match self {
            ActivationState::Enabled { coauthors, .. } => coauthors,
            ActivationState::Disabled => &[],
        }
    }

    /// Previously recorded hooks path, if any was recorded.
    pub fn previous_hooks_path(&self) -> Option<&str> {
        match self {
            ActivationState::Enabled {
                previous_hooks_path,
                ..
            } if !previous_hooks_path.is_empty() => Some(previous_hooks_path),
            _ => None,
        }
    }
}

/// Tool-level configuration read once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamConfig {
    pub activation_scope: ActivationScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_scope_maps_to_config_scope() {
        assert_eq!(ActivationScope::Global.config_scope(), ConfigScope::Global);
        assert_eq!(ActivationScope::RepoLocal.config_scope(), ConfigScope::Local);
    }

    #[test]
    fn activation_scope_parses_its_own_names() {
        for scope in [ActivationScope::Global, ActivationScope::RepoLocal] {
            assert_eq!(scope.as_str().parse::<ActivationScope>().expect("parse"), scope);
        }
        assert!("local".parse::<ActivationScope>().is_err());
    }

    #[test]
    fn previous_hooks_path_ignores_empty_values() {
        let state = ActivationState::Enabled {
            coauthors: vec!["A <a@b.c>".to_string()],
            previous_hooks_path: String::new(),
        };
        assert_eq!(state.previous_hooks_path(), None);
        assert_eq!(ActivationState::Disabled.previous_hooks_path(), None);
    }
}
