//! Activation scope persisted in the global git config.

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::core::types::{ActivationScope, ConfigScope, TeamConfig};
use crate::io::gitconfig::{GitConfigReader, GitConfigWriter, get_optional};

pub const ACTIVATION_SCOPE_KEY: &str = "team.config.activation-scope";

pub trait ConfigReader {
    fn read(&self) -> Result<TeamConfig>;
}

pub trait ConfigWriter {
    fn set_activation_scope(&self, scope: ActivationScope) -> Result<()>;
}

/// Reads and writes [`TeamConfig`] through the scoped config store.
pub struct GitConfigTeamConfig<'a, S> {
    store: &'a S,
}

impl<'a, S> GitConfigTeamConfig<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: GitConfigReader> ConfigReader for GitConfigTeamConfig<'_, S> {
    fn read(&self) -> Result<TeamConfig> {
        let raw = get_optional(self.store, ConfigScope::Global, ACTIVATION_SCOPE_KEY)?;
        let activation_scope = match raw.as_deref().map(str::trim) {
            None | Some("") => ActivationScope::Global,
            Some(raw) => raw.parse().map_err(|_| {
                anyhow!("unknown activation-scope '{raw}' found in config. Did you edit it manually?")
            })?,
        };
        debug!(%activation_scope, "loaded config");
        Ok(TeamConfig { activation_scope })
    }
}

impl<S: GitConfigWriter> ConfigWriter for GitConfigTeamConfig<'_, S> {
    fn set_activation_scope(&self, scope: ActivationScope) -> Result<()> {
        self.store
            .replace_all(ConfigScope::Global, ACTIVATION_SCOPE_KEY, scope.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gitconfig::GitConfigError;
    use crate::test_support::{InMemoryGitConfig, Op};

    #[test]
    fn missing_scope_defaults_to_global() {
        let store = InMemoryGitConfig::default();
        let cfg = GitConfigTeamConfig::new(&store).read().expect("read");
        assert_eq!(cfg.activation_scope, ActivationScope::Global);
    }

    #[test]
    fn reads_repo_local_scope() {
        let store = InMemoryGitConfig::default();
        store.set(ConfigScope::Global, ACTIVATION_SCOPE_KEY, "repo-local");
        let cfg = GitConfigTeamConfig::new(&store).read().expect("read");
        assert_eq!(cfg.activation_scope, ActivationScope::RepoLocal);
    }

    #[test]
    fn unknown_scope_is_an_error() {
        let store = InMemoryGitConfig::default();
        store.set(ConfigScope::Global, ACTIVATION_SCOPE_KEY, "everywhere");
        let err = GitConfigTeamConfig::new(&store).read().expect_err("unknown");
        assert_eq!(
            err.to_string(),
            "unknown activation-scope 'everywhere' found in config. Did you edit it manually?"
        );
    }

    #[test]
    fn store_failure_propagates() {
        let store = InMemoryGitConfig::default();
        store.fail(Op::Get, ACTIVATION_SCOPE_KEY, GitConfigError::ConfigFileIsInvalid);
        let err = GitConfigTeamConfig::new(&store).read().expect_err("invalid");
        assert_eq!(
            err.downcast_ref::<GitConfigError>(),
            Some(&GitConfigError::ConfigFileIsInvalid)
        );
    }

    #[test]
    fn set_writes_global_key() {
        let store = InMemoryGitConfig::default();
        GitConfigTeamConfig::new(&store)
            .set_activation_scope(ActivationScope::RepoLocal)
            .expect("set");
        assert_eq!(
            store.values(ConfigScope::Global, ACTIVATION_SCOPE_KEY),
            vec!["repo-local".to_string()]
        );
    }
}
