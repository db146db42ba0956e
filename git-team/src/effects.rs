//! Inert, data-described side effects and the shell that runs them.

use std::io::{self, Write};

use anyhow::Error;

use crate::exit_codes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PrintMessage(String),
    /// Rendered error chain, printed to stderr as `error: <message>`.
    PrintErr(String),
    ExitOk,
    ExitErr,
}

impl Effect {
    pub fn print_err(err: &Error) -> Self {
        Effect::PrintErr(format!("{err:#}"))
    }
}

/// Run effects in order and return the exit code.
///
/// The first exit effect stops execution; a list without one exits with
/// [`exit_codes::OK`].
pub fn run_effects(
    effects: &[Effect],
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<i32> {
    for effect in effects {
        match effect {
            Effect::PrintMessage(message) => writeln!(out, "{message}")?,
            Effect::PrintErr(message) => writeln!(err, "error: {message}")?,
            Effect::ExitOk => return Ok(exit_codes::OK),
            Effect::ExitErr => return Ok(exit_codes::FAILURE),
        }
    }
    Ok(exit_codes::OK)
}
