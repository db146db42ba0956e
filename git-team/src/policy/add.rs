//! `git team add`: assign a coauthor to an alias.

use anyhow::{Context, Error, Result};

use crate::core::coauthor::{alias_key, sanity_check_alias, sanity_check_coauthor};
use crate::io::alias::ALIAS_SCOPE;
use crate::io::gitconfig::{GitConfigReader, GitConfigWriter, get_optional};
use crate::io::prompt::Prompt;

pub struct Dependencies<'a> {
    pub git_config_reader: &'a dyn GitConfigReader,
    pub git_config_writer: &'a dyn GitConfigWriter,
    pub prompt: &'a dyn Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub alias: String,
    pub coauthor: String,
    /// Replace an existing assignment without asking.
    pub force_override: bool,
}

#[derive(Debug)]
pub enum AddEvent {
    Succeeded { alias: String, coauthor: String },
    /// The user kept the existing assignment.
    Aborted { alias: String, existing: String },
    Failed(Error),
}

pub fn apply(deps: &Dependencies<'_>, req: &Request) -> AddEvent {
    match add(deps, req) {
        Ok(Some(existing)) => AddEvent::Aborted {
            alias: req.alias.clone(),
            existing,
        },
        Ok(None) => AddEvent::Succeeded {
            alias: req.alias.clone(),
            coauthor: req.coauthor.clone(),
        },
        Err(err) => AddEvent::Failed(err),
    }
}

/// Returns the kept assignment when the user declined to override it.
fn add(deps: &Dependencies<'_>, req: &Request) -> Result<Option<String>> {
    sanity_check_alias(&req.alias)?;
    sanity_check_coauthor(&req.coauthor)?;

    let key = alias_key(&req.alias);
    let existing = get_optional(deps.git_config_reader, ALIAS_SCOPE, &key)
        .with_context(|| format!("failed to look up alias '{}'", req.alias))?;
    if let Some(existing) = existing.filter(|e| !e.is_empty() && *e != req.coauthor) {
        if !req.force_override
            && !deps
                .prompt
                .confirm_override(&req.alias, &existing, &req.coauthor)?
        {
            return Ok(Some(existing));
        }
    }

    deps.git_config_writer
        .replace_all(ALIAS_SCOPE, &key, &req.coauthor)
        .with_context(|| format!("failed to add alias '{}'", req.alias))?;
    Ok(None)
}
