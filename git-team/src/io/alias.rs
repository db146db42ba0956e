//! Alias lookups under `team.alias.<alias>` in the global git config.

use anyhow::{Error, anyhow};
use tracing::debug;

use crate::core::coauthor::{ALIAS_KEY_PREFIX, alias_key};
use crate::core::types::{Assignment, ConfigScope};
use crate::io::gitconfig::{GitConfigError, GitConfigReader};

/// Pattern matching every alias key.
pub const ALIAS_PATTERN: &str = "^team\\.alias\\.";

/// Scope that holds alias assignments.
pub const ALIAS_SCOPE: ConfigScope = ConfigScope::Global;

pub trait AliasResolver {
    /// Resolve every alias, accumulating one error per unresolvable alias.
    fn resolve_aliases(&self, aliases: &[String]) -> (Vec<String>, Vec<Error>);
}

pub struct GitConfigAliasResolver<'a, S> {
    store: &'a S,
}

impl<'a, S> GitConfigAliasResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: GitConfigReader> GitConfigAliasResolver<'_, S> {
    fn resolve_alias(&self, alias: &str) -> Result<String, Error> {
        let key = alias_key(alias);
        match self.store.get(ALIAS_SCOPE, &key) {
            Ok(coauthor) if !coauthor.is_empty() => Ok(coauthor),
            Ok(_) => Err(anyhow!("failed to resolve alias {key}")),
            Err(err) if err.is_missing_key() => Err(anyhow!("failed to resolve alias {key}")),
            Err(err) => Err(anyhow!("failed to resolve alias {key}: {err}")),
        }
    }
}

impl<S: GitConfigReader> AliasResolver for GitConfigAliasResolver<'_, S> {
    fn resolve_aliases(&self, aliases: &[String]) -> (Vec<String>, Vec<Error>) {
        let mut resolved = Vec::new();
        let mut errors = Vec::new();
        for alias in aliases {
            match self.resolve_alias(alias) {
                Ok(coauthor) => {
                    debug!(alias = %alias, "resolved alias");
                    resolved.push(coauthor);
                }
                Err(err) => errors.push(err),
            }
        }
        (resolved, errors)
    }
}

/// Read every alias assignment; no aliases at all is an empty list.
pub fn get_assignments(reader: &dyn GitConfigReader) -> Result<Vec<Assignment>, GitConfigError> {
    let raw = match reader.get_regexp(ALIAS_SCOPE, ALIAS_PATTERN) {
        Ok(raw) => raw,
        Err(err) if err.is_missing_key() => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    Ok(raw
        .into_iter()
        .map(|(key, coauthor)| Assignment {
            alias: key
                .strip_prefix(ALIAS_KEY_PREFIX)
                .unwrap_or(&key)
                .to_string(),
            coauthor,
        })
        .collect())
}
