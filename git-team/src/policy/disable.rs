//! `git team disable`: stop injecting coauthors.

use std::path::Path;

use anyhow::{Context, Error, Result, bail};

use crate::core::types::ActivationScope;
use crate::io::activation::ConfigReader;
use crate::io::fs::FileSystem;
use crate::io::git::ActivationValidator;
use crate::io::gitconfig::{GitConfigReader, GitConfigWriter, get_optional, unset_all_idempotent};
use crate::io::state::{StateReader, StateWriter};
use crate::policy::{COMMIT_TEMPLATE_KEY, HOOKS_PATH_KEY};

pub struct Dependencies<'a> {
    pub git_config_reader: &'a dyn GitConfigReader,
    pub git_config_writer: &'a dyn GitConfigWriter,
    pub config_reader: &'a dyn ConfigReader,
    pub fs: &'a dyn FileSystem,
    pub state_reader: &'a dyn StateReader,
    pub state_writer: &'a dyn StateWriter,
    pub activation_validator: &'a dyn ActivationValidator,
}

#[derive(Debug)]
pub enum DisableEvent {
    Succeeded,
    Failed(Error),
}

pub fn apply(deps: &Dependencies<'_>) -> DisableEvent {
    match disable(deps) {
        Ok(()) => DisableEvent::Succeeded,
        Err(err) => DisableEvent::Failed(err),
    }
}

fn disable(deps: &Dependencies<'_>) -> Result<()> {
    let cfg = deps.config_reader.read().context("failed to read config")?;
    let scope = cfg.activation_scope;
    if scope == ActivationScope::RepoLocal && !deps.activation_validator.is_inside_git_repository()
    {
        bail!("failed to disable with activation-scope=repo-local: not inside a git repository");
    }
    let config_scope = scope.config_scope();

    let template_path = get_optional(deps.git_config_reader, config_scope, COMMIT_TEMPLATE_KEY)
        .context("failed to get commit.template")?
        .unwrap_or_default();

    unset_all_idempotent(deps.git_config_writer, config_scope, COMMIT_TEMPLATE_KEY)
        .context("failed to unset commit.template")?;

    restore_hooks_path(deps, scope)?;

    if !template_path.is_empty() {
        remove_template(deps.fs, Path::new(&template_path))?;
    }

    deps.state_writer
        .persist_disabled(scope)
        .context("failed to write current state")?;
    Ok(())
}

/// Hand `core.hooksPath` back to whatever was configured before enable.
fn restore_hooks_path(deps: &Dependencies<'_>, scope: ActivationScope) -> Result<()> {
    let config_scope = scope.config_scope();
    let state = deps
        .state_reader
        .query(scope)
        .context("failed to read current state")?;
    match state.previous_hooks_path() {
        Some(previous) => deps
            .git_config_writer
            .replace_all(config_scope, HOOKS_PATH_KEY, previous)
            .context("failed to restore core.hooksPath"),
        None => unset_all_idempotent(deps.git_config_writer, config_scope, HOOKS_PATH_KEY)
            .context("failed to unset core.hooksPath"),
    }
}

/// Remove the template file; a file that cannot be stat'ed is left alone.
fn remove_template(fs: &dyn FileSystem, path: &Path) -> Result<()> {
    if fs.stat(path).is_err() {
        return Ok(());
    }
    fs.remove_file(path)
        .context("failed to remove commit template")
}
