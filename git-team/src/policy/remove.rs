//! `git team rm`: delete an alias assignment.

use anyhow::{Context, Error, Result};

use crate::core::coauthor::alias_key;
use crate::io::alias::ALIAS_SCOPE;
use crate::io::gitconfig::{GitConfigReader, GitConfigWriter, get_optional, unset_all_idempotent};

pub struct Dependencies<'a> {
    pub git_config_reader: &'a dyn GitConfigReader,
    pub git_config_writer: &'a dyn GitConfigWriter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub alias: String,
}

#[derive(Debug)]
pub enum RemoveEvent {
    Succeeded { alias: String },
    /// No such alias; nothing was changed.
    Skipped { alias: String },
    Failed(Error),
}

pub fn apply(deps: &Dependencies<'_>, req: &Request) -> RemoveEvent {
    let alias = req.alias.clone();
    match remove(deps, &req.alias) {
        Ok(true) => RemoveEvent::Succeeded { alias },
        Ok(false) => RemoveEvent::Skipped { alias },
        Err(err) => RemoveEvent::Failed(err),
    }
}

fn remove(deps: &Dependencies<'_>, alias: &str) -> Result<bool> {
    let key = alias_key(alias);
    let existing = get_optional(deps.git_config_reader, ALIAS_SCOPE, &key)
        .with_context(|| format!("failed to look up alias '{alias}'"))?;
    if existing.is_none() {
        return Ok(false);
    }
    unset_all_idempotent(deps.git_config_writer, ALIAS_SCOPE, &key)
        .with_context(|| format!("failed to remove alias '{alias}'"))?;
    Ok(true)
}
