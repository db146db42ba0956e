//! Activation state persisted in git config.
//!
//! The state lives next to the settings it describes: a global activation is
//! recorded in the global git config, a repo-local one in the repository's
//! config. Persisting the state is always the last step of `enable`/`disable`.

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::core::types::{ActivationScope, ActivationState};
use crate::io::gitconfig::{
    GitConfigError, GitConfigReader, GitConfigWriter, get_optional, unset_all_idempotent,
};

pub const STATUS_KEY: &str = "team.state.status";
pub const ACTIVE_COAUTHORS_KEY: &str = "team.state.active-coauthors";
pub const PREVIOUS_HOOKS_PATH_KEY: &str = "team.state.previous-hooks-path";

const STATUS_ENABLED: &str = "enabled";
const STATUS_DISABLED: &str = "disabled";

pub trait StateReader {
    fn query(&self, scope: ActivationScope) -> Result<ActivationState>;
}

pub trait StateWriter {
    fn persist_enabled(
        &self,
        scope: ActivationScope,
        coauthors: &[String],
        previous_hooks_path: &str,
    ) -> Result<(), GitConfigError>;
    fn persist_disabled(&self, scope: ActivationScope) -> Result<(), GitConfigError>;
}

/// State repository backed by the scoped config store.
pub struct GitConfigStateRepository<'a, S> {
    store: &'a S,
}

impl<'a, S> GitConfigStateRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: GitConfigReader> StateReader for GitConfigStateRepository<'_, S> {
    fn query(&self, scope: ActivationScope) -> Result<ActivationState> {
        let config_scope = scope.config_scope();
        let status = get_optional(self.store, config_scope, STATUS_KEY)?;

        let state = match status.as_deref() {
            None | Some(STATUS_DISABLED) => ActivationState::Disabled,
            Some(STATUS_ENABLED) => {
                let coauthors = match self.store.get_all(config_scope, ACTIVE_COAUTHORS_KEY) {
                    Ok(coauthors) => coauthors,
                    Err(err) if err.is_missing_key() => Vec::new(),
                    Err(err) => return Err(err.into()),
                };
                let previous_hooks_path =
                    get_optional(self.store, config_scope, PREVIOUS_HOOKS_PATH_KEY)?
                        .unwrap_or_default();
                ActivationState::Enabled {
                    coauthors,
                    previous_hooks_path,
                }
            }
            Some(other) => return Err(anyhow!("unknown git-team status '{other}'")),
        };
        debug!(%scope, enabled = state.is_enabled(), "queried state");
        Ok(state)
    }
}

impl<S: GitConfigWriter> GitConfigStateRepository<'_, S> {
    fn clear_active_coauthors(&self, scope: ActivationScope) -> Result<(), GitConfigError> {
        unset_all_idempotent(self.store, scope.config_scope(), ACTIVE_COAUTHORS_KEY)
    }

    fn set_status(&self, scope: ActivationScope, status: &str) -> Result<(), GitConfigError> {
        self.store
            .replace_all(scope.config_scope(), STATUS_KEY, status)
    }
}

impl<S: GitConfigWriter> StateWriter for GitConfigStateRepository<'_, S> {
    fn persist_enabled(
        &self,
        scope: ActivationScope,
        coauthors: &[String],
        previous_hooks_path: &str,
    ) -> Result<(), GitConfigError> {
        let config_scope = scope.config_scope();
        self.clear_active_coauthors(scope)?;
        for coauthor in coauthors {
            self.store
                .add(config_scope, ACTIVE_COAUTHORS_KEY, coauthor)?;
        }
        self.store
            .replace_all(config_scope, PREVIOUS_HOOKS_PATH_KEY, previous_hooks_path)?;
        self.set_status(scope, STATUS_ENABLED)
    }

    fn persist_disabled(&self, scope: ActivationScope) -> Result<(), GitConfigError> {
        self.clear_active_coauthors(scope)?;
        self.set_status(scope, STATUS_DISABLED)
    }
}
