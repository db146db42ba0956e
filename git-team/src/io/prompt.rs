//! Interactive confirmation for overriding an existing alias.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

pub trait Prompt {
    /// Ask whether `alias` should be re-assigned from `existing` to `replacement`.
    fn confirm_override(&self, alias: &str, existing: &str, replacement: &str) -> Result<bool>;
}

/// [`Prompt`] reading the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm_override(&self, alias: &str, existing: &str, replacement: &str) -> Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        ask_override(stdin.lock(), stdout.lock(), alias, existing, replacement)
    }
}

fn ask_override(
    mut input: impl BufRead,
    mut output: impl Write,
    alias: &str,
    existing: &str,
    replacement: &str,
) -> Result<bool> {
    write!(
        output,
        "Alias '{alias}' -> '{existing}' exists already. Override with '{replacement}'? [N/y] "
    )
    .context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("read answer")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
