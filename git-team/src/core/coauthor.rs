//! Coauthor and alias validation, de-duplication and template rendering.

use std::collections::HashSet;

use anyhow::{Error, anyhow};

/// Prefix of every alias key in git config.
pub const ALIAS_KEY_PREFIX: &str = "team.alias.";

/// Split user tokens into `(coauthor candidates, alias candidates)`.
///
/// A token containing a space is a literal coauthor; everything else is an alias.
pub fn partition(tokens: &[String]) -> (Vec<String>, Vec<String>) {
    tokens
        .iter()
        .cloned()
        .partition(|token| token.contains(' '))
}

/// Validate the `"Name <email>"` shape of a single coauthor.
pub fn sanity_check_coauthor(candidate: &str) -> Result<(), Error> {
    let invalid = || anyhow!("not a valid coauthor: {candidate}");
    let Some(open) = candidate.find(" <") else {
        return Err(invalid());
    };
    let email = &candidate[open + 2..];
    if email.len() > 1 && email.ends_with('>') && email.contains('@') {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Validate every candidate, accumulating one error per violation.
pub fn sanity_check_coauthors(candidates: &[String]) -> Vec<Error> {
    candidates
        .iter()
        .filter_map(|candidate| sanity_check_coauthor(candidate).err())
        .collect()
}

/// Validate an alias name: non-empty, no whitespace, no angle brackets.
pub fn sanity_check_alias(alias: &str) -> Result<(), Error> {
    let valid = !alias.is_empty()
        && !alias.chars().any(|c| c.is_whitespace() || c == '<' || c == '>');
    if valid {
        Ok(())
    } else {
        Err(anyhow!("not a valid alias: '{alias}'"))
    }
}

/// Drop exact duplicates, keeping the first occurrence of each coauthor.
pub fn remove_duplicates(coauthors: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    coauthors
        .into_iter()
        .filter(|coauthor| seen.insert(coauthor.clone()))
        .collect()
}

/// Render the commit template body for the given coauthors.
pub fn prepare_for_commit_message(coauthors: &[String]) -> String {
    let lines: Vec<String> = coauthors
        .iter()
        .map(|coauthor| format!("Co-authored-by: {coauthor}"))
        .collect();
    format!("\n\n{}", lines.join("\n"))
}

pub fn alias_key(alias: &str) -> String {
    format!("{ALIAS_KEY_PREFIX}{alias}")
}
