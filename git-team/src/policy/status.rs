//! `git team status`: report the activation state of the current scope.

use anyhow::{Context, Error, Result};

use crate::core::types::ActivationState;
use crate::io::activation::ConfigReader;
use crate::io::state::StateReader;

pub struct Dependencies<'a> {
    pub config_reader: &'a dyn ConfigReader,
    pub state_reader: &'a dyn StateReader,
}

#[derive(Debug)]
pub enum StatusEvent {
    StateRetrievalSucceeded(ActivationState),
    StateRetrievalFailed(Error),
}

pub fn apply(deps: &Dependencies<'_>) -> StatusEvent {
    match query(deps) {
        Ok(state) => StatusEvent::StateRetrievalSucceeded(state),
        Err(err) => StatusEvent::StateRetrievalFailed(err),
    }
}

fn query(deps: &Dependencies<'_>) -> Result<ActivationState> {
    let cfg = deps.config_reader.read().context("failed to read config")?;
    deps.state_reader
        .query(cfg.activation_scope)
        .context("failed to read current state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ActivationScope, ConfigScope};
    use crate::io::activation::{ACTIVATION_SCOPE_KEY, GitConfigTeamConfig};
    use crate::io::gitconfig::GitConfigError;
    use crate::io::state::{ACTIVE_COAUTHORS_KEY, GitConfigStateRepository, STATUS_KEY, StateWriter};
    use crate::test_support::{InMemoryGitConfig, Op};

    fn status(store: &InMemoryGitConfig) -> StatusEvent {
        let config = GitConfigTeamConfig::new(store);
        let state = GitConfigStateRepository::new(store);
        apply(&Dependencies {
            config_reader: &config,
            state_reader: &state,
        })
    }

    #[test]
    fn reports_the_state_of_the_activation_scope() {
        let store = InMemoryGitConfig::default();
        store.set(ConfigScope::Global, ACTIVATION_SCOPE_KEY, "repo-local");
        GitConfigStateRepository::new(&store)
            .persist_enabled(
                ActivationScope::RepoLocal,
                &["A <a@a.se>".to_string()],
                "",
            )
            .expect("persist");

        match status(&store) {
            StatusEvent::StateRetrievalSucceeded(state) => {
                assert_eq!(state.coauthors(), &["A <a@a.se>".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unset_state_is_disabled() {
        let store = InMemoryGitConfig::default();
        assert!(matches!(
            status(&store),
            StatusEvent::StateRetrievalSucceeded(ActivationState::Disabled)
        ));
    }

    #[test]
    fn config_failure_is_reported() {
        let store = InMemoryGitConfig::default();
        store.fail(Op::Get, ACTIVATION_SCOPE_KEY, GitConfigError::ConfigFileIsInvalid);
        match status(&store) {
            StatusEvent::StateRetrievalFailed(err) => assert_eq!(
                format!("{err:#}"),
                "failed to read config: the config file is invalid"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn state_failure_is_reported() {
        let store = InMemoryGitConfig::default();
        store.set(ConfigScope::Global, STATUS_KEY, "enabled");
        store.fail(Op::GetAll, ACTIVE_COAUTHORS_KEY, GitConfigError::ConfigFileIsInvalid);
        match status(&store) {
            StatusEvent::StateRetrievalFailed(err) => assert_eq!(
                format!("{err:#}"),
                "failed to read current state: the config file is invalid"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }
}
