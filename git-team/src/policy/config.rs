//! `git team config`: show or change the activation scope.

use anyhow::{Context, Error, Result};

use crate::core::types::{ActivationScope, TeamConfig};
use crate::io::activation::{ConfigReader, ConfigWriter};

pub struct Dependencies<'a> {
    pub config_reader: &'a dyn ConfigReader,
    pub config_writer: &'a dyn ConfigWriter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Show,
    /// Raw value as typed by the user.
    SetActivationScope(String),
}

#[derive(Debug)]
pub enum ConfigEvent {
    RetrievalSucceeded(TeamConfig),
    RetrievalFailed(Error),
    SettingSucceeded(ActivationScope),
    SettingFailed(Error),
}

pub fn apply(deps: &Dependencies<'_>, req: &Request) -> ConfigEvent {
    match req {
        Request::Show => match deps.config_reader.read() {
            Ok(cfg) => ConfigEvent::RetrievalSucceeded(cfg),
            Err(err) => ConfigEvent::RetrievalFailed(err.context("failed to read config")),
        },
        Request::SetActivationScope(raw) => match set_activation_scope(deps, raw) {
            Ok(scope) => ConfigEvent::SettingSucceeded(scope),
            Err(err) => ConfigEvent::SettingFailed(err),
        },
    }
}

fn set_activation_scope(deps: &Dependencies<'_>, raw: &str) -> Result<ActivationScope> {
    let scope: ActivationScope = raw.parse()?;
    deps.config_writer
        .set_activation_scope(scope)
        .context("failed to set activation-scope")?;
    Ok(scope)
}
