//! `git team ls`: list every alias assignment.

use anyhow::Error;

use crate::core::types::Assignment;
use crate::io::alias::get_assignments;
use crate::io::gitconfig::GitConfigReader;

pub struct Dependencies<'a> {
    pub git_config_reader: &'a dyn GitConfigReader,
}

#[derive(Debug)]
pub enum ListEvent {
    RetrievalSucceeded(Vec<Assignment>),
    RetrievalFailed(Error),
}

pub fn apply(deps: &Dependencies<'_>) -> ListEvent {
    match get_assignments(deps.git_config_reader) {
        Ok(assignments) => ListEvent::RetrievalSucceeded(assignments),
        Err(err) => {
            ListEvent::RetrievalFailed(Error::new(err).context("failed to retrieve assignments"))
        }
    }
}
