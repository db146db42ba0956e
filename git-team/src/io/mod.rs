//! I/O adapters for git-team commands.

pub mod activation;
pub mod alias;
pub mod config;
pub mod fs;
pub mod git;
pub mod gitconfig;
pub mod prompt;
pub mod state;
