//! `git team enable`: activate coauthors for the following commits.
//!
//! Enabling renders the coauthors into a commit template, points
//! `commit.template` and `core.hooksPath` at git-team's files and finally
//! persists the activation state. Every step short-circuits on failure and
//! nothing is rolled back; the state is written last so a persisted
//! `Enabled` state implies every earlier step succeeded.

use anyhow::{Context, Error, Result, bail};

use crate::core::coauthor::{partition, prepare_for_commit_message, remove_duplicates};
use crate::core::types::ActivationScope;
use crate::io::activation::ConfigReader;
use crate::io::alias::{AliasResolver, get_assignments};
use crate::io::config::CommitSettings;
use crate::io::fs::FileSystem;
use crate::io::git::ActivationValidator;
use crate::io::gitconfig::{GitConfigReader, GitConfigWriter, get_optional};
use crate::io::state::{StateReader, StateWriter};
use crate::policy::{COMMIT_TEMPLATE_KEY, HOOKS_PATH_KEY};

pub struct Dependencies<'a> {
    pub sanity_check_coauthors: fn(&[String]) -> Vec<Error>,
    pub alias_resolver: &'a dyn AliasResolver,
    pub git_config_reader: &'a dyn GitConfigReader,
    pub git_config_writer: &'a dyn GitConfigWriter,
    pub config_reader: &'a dyn ConfigReader,
    pub commit_settings: &'a dyn CommitSettings,
    pub fs: &'a dyn FileSystem,
    pub state_reader: &'a dyn StateReader,
    pub state_writer: &'a dyn StateWriter,
    pub activation_validator: &'a dyn ActivationValidator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Literal `"Name <email>"` coauthors and aliases, in any mix.
    pub aliases_and_coauthors: Vec<String>,
    /// Also enable every assigned alias.
    pub use_all: bool,
}

#[derive(Debug)]
pub enum EnableEvent {
    Succeeded,
    /// Nothing to enable.
    Aborted,
    /// Every collected error; input errors are reported together.
    Failed(Vec<Error>),
}

pub fn apply(deps: &Dependencies<'_>, req: &Request) -> EnableEvent {
    if req.aliases_and_coauthors.is_empty() && !req.use_all {
        return EnableEvent::Aborted;
    }

    let coauthors = match collect_coauthors(deps, req) {
        Ok(coauthors) => coauthors,
        Err(errors) => return EnableEvent::Failed(errors),
    };
    if coauthors.is_empty() {
        return EnableEvent::Aborted;
    }

    match activate(deps, &coauthors) {
        Ok(()) => EnableEvent::Succeeded,
        Err(err) => EnableEvent::Failed(vec![err]),
    }
}

/// Validate literal coauthors and resolve aliases, reporting all input errors at once.
fn collect_coauthors(deps: &Dependencies<'_>, req: &Request) -> Result<Vec<String>, Vec<Error>> {
    let (mut coauthors, aliases) = partition(&req.aliases_and_coauthors);

    let mut errors = (deps.sanity_check_coauthors)(&coauthors);
    let (resolved, resolve_errors) = deps.alias_resolver.resolve_aliases(&aliases);
    errors.extend(resolve_errors);

    let mut assigned = Vec::new();
    if req.use_all {
        match get_assignments(deps.git_config_reader) {
            Ok(assignments) => {
                assigned.extend(assignments.into_iter().map(|assignment| assignment.coauthor));
            }
            Err(err) => errors.push(Error::new(err).context("failed to retrieve assignments")),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    coauthors.extend(resolved);
    coauthors.extend(assigned);
    Ok(remove_duplicates(coauthors))
}

fn activate(deps: &Dependencies<'_>, coauthors: &[String]) -> Result<()> {
    let cfg = deps.config_reader.read().context("failed to read config")?;
    let scope = cfg.activation_scope;
    if scope == ActivationScope::RepoLocal && !deps.activation_validator.is_inside_git_repository()
    {
        bail!("failed to enable with activation-scope=repo-local: not inside a git repository");
    }
    let config_scope = scope.config_scope();

    let template_path = deps
        .commit_settings
        .template_path(scope)
        .context("failed to determine commit template path")?;
    if let Some(dir) = template_path.parent() {
        deps.fs
            .create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    deps.fs
        .write_file(
            &template_path,
            prepare_for_commit_message(coauthors).as_bytes(),
        )
        .with_context(|| format!("failed to write {}", template_path.display()))?;
    deps.git_config_writer
        .replace_all(
            config_scope,
            COMMIT_TEMPLATE_KEY,
            &template_path.to_string_lossy(),
        )
        .context("failed to set commit.template")?;

    let hooks_path = deps.commit_settings.hooks_path();
    let hooks_path = hooks_path.to_string_lossy();
    let previous_hooks_path = previous_hooks_path(deps, scope, &hooks_path)?;
    deps.git_config_writer
        .replace_all(config_scope, HOOKS_PATH_KEY, &hooks_path)
        .context("failed to set core.hooksPath")?;

    deps.state_writer
        .persist_enabled(scope, coauthors, &previous_hooks_path)
        .context("failed to write current state")?;
    Ok(())
}

/// The hooks path to restore on disable.
///
/// When git-team already owns `core.hooksPath`, the value recorded by the
/// earlier enable is kept.
fn previous_hooks_path(
    deps: &Dependencies<'_>,
    scope: ActivationScope,
    hooks_path: &str,
) -> Result<String> {
    let current = get_optional(deps.git_config_reader, scope.config_scope(), HOOKS_PATH_KEY)
        .context("failed to get core.hooksPath")?
        .unwrap_or_default();
    if current != hooks_path {
        return Ok(current);
    }
    let state = deps
        .state_reader
        .query(scope)
        .context("failed to read current state")?;
    Ok(state.previous_hooks_path().unwrap_or_default().to_string())
}
