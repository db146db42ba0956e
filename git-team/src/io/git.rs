//! Git adapter for git-team.
//!
//! Everything git-team knows about the repository and its configuration goes
//! through a small, explicit wrapper around `git` subprocess calls.

use std::path::PathBuf;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Answers whether the working directory belongs to a git repository.
pub trait ActivationValidator {
    fn is_inside_git_repository(&self) -> bool;
}

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Git wrapper rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("read current directory")?;
        Ok(Self::new(cwd))
    }

    /// True if `workdir` is inside a git work tree.
    #[instrument(skip_all)]
    pub fn is_inside_work_tree(&self) -> bool {
        match self.run(&["rev-parse", "--is-inside-work-tree"]) {
            Ok(out) => {
                let inside =
                    out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true";
                debug!(inside, "checked work tree");
                inside
            }
            Err(err) => {
                debug!(err = %err, "git rev-parse failed");
                false
            }
        }
    }

    /// Absolute path of the repository's `.git` directory.
    pub fn absolute_git_dir(&self) -> Result<PathBuf> {
        let out = self.run_capture(&["rev-parse", "--absolute-git-dir"])?;
        let dir = out.trim();
        if dir.is_empty() {
            return Err(anyhow!("git rev-parse returned an empty git dir"));
        }
        Ok(PathBuf::from(dir))
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    /// Run git and return the raw output, regardless of exit status.
    pub(crate) fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

impl ActivationValidator for Git {
    fn is_inside_git_repository(&self) -> bool {
        self.is_inside_work_tree()
    }
}
