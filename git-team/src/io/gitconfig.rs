//! Scoped access to git's own configuration store.
//!
//! Every read and write names a [`ConfigScope`]; a global write never touches
//! the repository-local file and vice versa. Failures are reported as
//! [`GitConfigError`] values derived from `git config` exit codes so callers
//! can tell idempotency signals apart from fatal errors.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::core::types::ConfigScope;
use crate::io::git::Git;

/// Errors reported by `git config`, one variant per documented exit code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitConfigError {
    #[error("the section or key is invalid")]
    SectionOrKeyIsInvalid,
    #[error("no section or name was provided")]
    NoSectionOrNameProvided,
    #[error("the config file is invalid")]
    ConfigFileIsInvalid,
    #[error("the config file cannot be written")]
    ConfigFileCannotBeWritten,
    #[error("trying to unset an option which does not exist")]
    TryingToUnsetAnOptionWhichDoesNotExist,
    #[error("trying to use an invalid regexp")]
    InvalidRegexp,
    #[error("git config failed: {0}")]
    Failed(String),
}

impl GitConfigError {
    fn from_exit_code(code: Option<i32>, stderr: &str) -> Self {
        match code {
            Some(1) => GitConfigError::SectionOrKeyIsInvalid,
            Some(2) => GitConfigError::NoSectionOrNameProvided,
            Some(3) => GitConfigError::ConfigFileIsInvalid,
            Some(4) => GitConfigError::ConfigFileCannotBeWritten,
            Some(5) => GitConfigError::TryingToUnsetAnOptionWhichDoesNotExist,
            Some(6) => GitConfigError::InvalidRegexp,
            Some(code) => GitConfigError::Failed(format!("exit code {code}: {}", stderr.trim())),
            None => GitConfigError::Failed(format!("terminated by signal: {}", stderr.trim())),
        }
    }

    /// The key (or section) is absent; optional reads treat this as "no value".
    pub fn is_missing_key(&self) -> bool {
        matches!(self, GitConfigError::SectionOrKeyIsInvalid)
    }

    /// The option was already unset; cleanup treats this as success.
    pub fn is_already_unset(&self) -> bool {
        matches!(self, GitConfigError::TryingToUnsetAnOptionWhichDoesNotExist)
    }
}

/// Read access to a scoped config store.
pub trait GitConfigReader {
    /// First value of `key`, or an empty string if git prints nothing.
    fn get(&self, scope: ConfigScope, key: &str) -> Result<String, GitConfigError>;
    /// All values of a multi-valued `key`.
    fn get_all(&self, scope: ConfigScope, key: &str) -> Result<Vec<String>, GitConfigError>;
    /// All `key -> value` pairs whose key matches `pattern`.
    fn get_regexp(
        &self,
        scope: ConfigScope,
        pattern: &str,
    ) -> Result<BTreeMap<String, String>, GitConfigError>;
    /// Every `key -> value` pair in the scope.
    fn list(&self, scope: ConfigScope) -> Result<BTreeMap<String, String>, GitConfigError>;
}

/// Write access to a scoped config store.
pub trait GitConfigWriter {
    fn replace_all(&self, scope: ConfigScope, key: &str, value: &str)
    -> Result<(), GitConfigError>;
    fn add(&self, scope: ConfigScope, key: &str, value: &str) -> Result<(), GitConfigError>;
    fn unset_all(&self, scope: ConfigScope, key: &str) -> Result<(), GitConfigError>;
}

/// Read an optional setting: a missing key yields `None`.
pub fn get_optional(
    reader: &dyn GitConfigReader,
    scope: ConfigScope,
    key: &str,
) -> Result<Option<String>, GitConfigError> {
    match reader.get(scope, key) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_missing_key() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Unset a key, treating "does not exist" as success.
pub fn unset_all_idempotent(
    writer: &dyn GitConfigWriter,
    scope: ConfigScope,
    key: &str,
) -> Result<(), GitConfigError> {
    match writer.unset_all(scope, key) {
        Err(err) if err.is_already_unset() => Ok(()),
        other => other,
    }
}

/// [`GitConfigReader`]/[`GitConfigWriter`] backed by the `git config` binary.
#[derive(Debug, Clone)]
pub struct GitConfig {
    git: Git,
}

impl GitConfig {
    pub fn new(git: Git) -> Self {
        Self { git }
    }

    #[instrument(skip_all, fields(scope = %scope))]
    fn exec(&self, scope: ConfigScope, args: &[&str]) -> Result<Vec<String>, GitConfigError> {
        let mut full = vec!["config", scope.flag()];
        full.extend_from_slice(args);

        let output = self
            .git
            .run(&full)
            .map_err(|err| GitConfigError::Failed(format!("{err:#}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = GitConfigError::from_exit_code(output.status.code(), &stderr);
            debug!(exit_code = ?output.status.code(), err = %err, "git config returned an error");
            if matches!(err, GitConfigError::Failed(_)) {
                warn!(err = %err, "unexpected git config failure");
            }
            return Err(err);
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

impl GitConfigReader for GitConfig {
    fn get(&self, scope: ConfigScope, key: &str) -> Result<String, GitConfigError> {
        let lines = self.exec(scope, &["--get", key])?;
        Ok(first_value(&lines))
    }

    fn get_all(&self, scope: ConfigScope, key: &str) -> Result<Vec<String>, GitConfigError> {
        let lines = self.exec(scope, &["--get-all", key])?;
        Ok(non_empty_values(&lines))
    }

    fn get_regexp(
        &self,
        scope: ConfigScope,
        pattern: &str,
    ) -> Result<BTreeMap<String, String>, GitConfigError> {
        let lines = self.exec(scope, &["--get-regexp", pattern])?;
        Ok(parse_regexp_lines(&lines))
    }

    fn list(&self, scope: ConfigScope) -> Result<BTreeMap<String, String>, GitConfigError> {
        let lines = self.exec(scope, &["--list"])?;
        Ok(parse_list_lines(&lines))
    }
}

impl GitConfigWriter for GitConfig {
    fn replace_all(
        &self,
        scope: ConfigScope,
        key: &str,
        value: &str,
    ) -> Result<(), GitConfigError> {
        debug!(%scope, key, "replace-all");
        self.exec(scope, &["--replace-all", key, value]).map(drop)
    }

    fn add(&self, scope: ConfigScope, key: &str, value: &str) -> Result<(), GitConfigError> {
        debug!(%scope, key, "add");
        self.exec(scope, &["--add", key, value]).map(drop)
    }

    fn unset_all(&self, scope: ConfigScope, key: &str) -> Result<(), GitConfigError> {
        debug!(%scope, key, "unset-all");
        self.exec(scope, &["--unset-all", key]).map(drop)
    }
}

fn first_value(lines: &[String]) -> String {
    lines
        .first()
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

fn non_empty_values(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `git config --get-regexp` output (`key value` per line).
fn parse_regexp_lines(lines: &[String]) -> BTreeMap<String, String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(' ') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

/// Parse `git config --list` output (`key=value` per line).
fn parse_list_lines(lines: &[String]) -> BTreeMap<String, String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}
