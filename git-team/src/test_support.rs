//! Test-only doubles for the git-team dependency seams.
//!
//! The fakes keep their state in memory, record every call, and can be told to
//! fail a specific operation so each policy branch can be driven
//! deterministically.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::types::{ActivationScope, ConfigScope};
use crate::io::config::CommitSettings;
use crate::io::fs::FileSystem;
use crate::io::git::ActivationValidator;
use crate::io::gitconfig::{GitConfigError, GitConfigReader, GitConfigWriter};
use crate::io::prompt::Prompt;

/// Config store operation, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    GetAll,
    GetRegexp,
    List,
    ReplaceAll,
    Add,
    UnsetAll,
}

/// One recorded config store call. `key` holds the pattern for `GetRegexp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub scope: ConfigScope,
    pub key: String,
}

/// In-memory scoped config store mirroring `git config` error semantics.
#[derive(Debug, Default)]
pub struct InMemoryGitConfig {
    entries: RefCell<BTreeMap<(ConfigScope, String), Vec<String>>>,
    failures: RefCell<HashMap<(Op, String), GitConfigError>>,
    calls: RefCell<Vec<Call>>,
}

impl InMemoryGitConfig {
    /// Seed a single value without recording a call.
    pub fn set(&self, scope: ConfigScope, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert((scope, key.to_string()), vec![value.to_string()]);
    }

    pub fn values(&self, scope: ConfigScope, key: &str) -> Vec<String> {
        self.entries
            .borrow()
            .get(&(scope, key.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Make every `op` on `key` (in any scope) fail with `err`.
    pub fn fail(&self, op: Op, key: &str, err: GitConfigError) {
        self.failures.borrow_mut().insert((op, key.to_string()), err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_for(&self, op: Op) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.op == op)
            .cloned()
            .collect()
    }

    fn record(&self, op: Op, scope: ConfigScope, key: &str) -> Result<(), GitConfigError> {
        self.calls.borrow_mut().push(Call {
            op,
            scope,
            key: key.to_string(),
        });
        match self.failures.borrow().get(&(op, key.to_string())) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Treat a `^prefix\.` style pattern as a plain key prefix.
fn pattern_prefix(pattern: &str) -> String {
    pattern.trim_start_matches('^').replace("\\.", ".")
}

impl GitConfigReader for InMemoryGitConfig {
    fn get(&self, scope: ConfigScope, key: &str) -> Result<String, GitConfigError> {
        self.record(Op::Get, scope, key)?;
        self.entries
            .borrow()
            .get(&(scope, key.to_string()))
            .and_then(|values| values.last().cloned())
            .ok_or(GitConfigError::SectionOrKeyIsInvalid)
    }

    fn get_all(&self, scope: ConfigScope, key: &str) -> Result<Vec<String>, GitConfigError> {
        self.record(Op::GetAll, scope, key)?;
        self.entries
            .borrow()
            .get(&(scope, key.to_string()))
            .filter(|values| !values.is_empty())
            .cloned()
            .ok_or(GitConfigError::SectionOrKeyIsInvalid)
    }

    fn get_regexp(
        &self,
        scope: ConfigScope,
        pattern: &str,
    ) -> Result<BTreeMap<String, String>, GitConfigError> {
        self.record(Op::GetRegexp, scope, pattern)?;
        let prefix = pattern_prefix(pattern);
        let matches: BTreeMap<String, String> = self
            .entries
            .borrow()
            .iter()
            .filter(|((entry_scope, key), _)| *entry_scope == scope && key.starts_with(&prefix))
            .filter_map(|((_, key), values)| values.last().map(|v| (key.clone(), v.clone())))
            .collect();
        if matches.is_empty() {
            return Err(GitConfigError::SectionOrKeyIsInvalid);
        }
        Ok(matches)
    }

    fn list(&self, scope: ConfigScope) -> Result<BTreeMap<String, String>, GitConfigError> {
        self.record(Op::List, scope, "")?;
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|((entry_scope, _), _)| *entry_scope == scope)
            .filter_map(|((_, key), values)| values.last().map(|v| (key.clone(), v.clone())))
            .collect())
    }
}

impl GitConfigWriter for InMemoryGitConfig {
    fn replace_all(
        &self,
        scope: ConfigScope,
        key: &str,
        value: &str,
    ) -> Result<(), GitConfigError> {
        self.record(Op::ReplaceAll, scope, key)?;
        self.set(scope, key, value);
        Ok(())
    }

    fn add(&self, scope: ConfigScope, key: &str, value: &str) -> Result<(), GitConfigError> {
        self.record(Op::Add, scope, key)?;
        self.entries
            .borrow_mut()
            .entry((scope, key.to_string()))
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    fn unset_all(&self, scope: ConfigScope, key: &str) -> Result<(), GitConfigError> {
        self.record(Op::UnsetAll, scope, key)?;
        match self.entries.borrow_mut().remove(&(scope, key.to_string())) {
            Some(_) => Ok(()),
            None => Err(GitConfigError::TryingToUnsetAnOptionWhichDoesNotExist),
        }
    }
}

/// Filesystem operation, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsOp {
    CreateDirAll,
    WriteFile,
    Stat,
    RemoveFile,
}

/// In-memory filesystem with per-operation failure injection.
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    failures: RefCell<HashMap<FsOp, String>>,
    calls: RefCell<Vec<(FsOp, PathBuf)>>,
}

impl InMemoryFileSystem {
    pub fn with_file(path: impl Into<PathBuf>, contents: &str) -> Self {
        let fs = Self::default();
        fs.files
            .borrow_mut()
            .insert(path.into(), contents.as_bytes().to_vec());
        fs
    }

    /// Make every `op` fail with an `io::Error` carrying `message`.
    pub fn fail(&self, op: FsOp, message: &str) {
        self.failures.borrow_mut().insert(op, message.to_string());
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    pub fn calls(&self) -> Vec<(FsOp, PathBuf)> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: FsOp, path: &Path) -> io::Result<()> {
        self.calls.borrow_mut().push((op, path.to_path_buf()));
        match self.failures.borrow().get(&op) {
            Some(message) => Err(io::Error::other(message.clone())),
            None => Ok(()),
        }
    }
}

impl FileSystem for InMemoryFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.record(FsOp::CreateDirAll, path)?;
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.record(FsOp::WriteFile, path)?;
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn stat(&self, path: &Path) -> io::Result<()> {
        self.record(FsOp::Stat, path)?;
        if self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.record(FsOp::RemoveFile, path)?;
        match self.files.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }
}

pub const GLOBAL_TEMPLATE_PATH: &str =
    "/home/some-user/.config/git-team/commit-templates/global/COMMIT_TEMPLATE";
pub const REPO_LOCAL_TEMPLATE_PATH: &str = "/path/to/repo/.git/git-team/COMMIT_TEMPLATE";
pub const HOOKS_PATH: &str = "/usr/local/etc/git-team/hooks";

/// [`CommitSettings`] with fixed paths.
#[derive(Debug, Clone)]
pub struct FixedCommitSettings {
    pub global: PathBuf,
    pub repo_local: PathBuf,
    pub hooks: PathBuf,
}

impl Default for FixedCommitSettings {
    fn default() -> Self {
        Self {
            global: PathBuf::from(GLOBAL_TEMPLATE_PATH),
            repo_local: PathBuf::from(REPO_LOCAL_TEMPLATE_PATH),
            hooks: PathBuf::from(HOOKS_PATH),
        }
    }
}

impl CommitSettings for FixedCommitSettings {
    fn template_path(&self, scope: ActivationScope) -> Result<PathBuf> {
        Ok(match scope {
            ActivationScope::Global => self.global.clone(),
            ActivationScope::RepoLocal => self.repo_local.clone(),
        })
    }

    fn hooks_path(&self) -> PathBuf {
        self.hooks.clone()
    }
}

/// [`ActivationValidator`] with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StubActivationValidator(pub bool);

impl ActivationValidator for StubActivationValidator {
    fn is_inside_git_repository(&self) -> bool {
        self.0
    }
}

/// [`Prompt`] returning a scripted answer and counting how often it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answer: bool,
    asked: Cell<usize>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm_override(&self, _alias: &str, _existing: &str, _replacement: &str) -> Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}

#[cfg(feature = "test-support")]
pub use home::TestHome;

#[cfg(feature = "test-support")]
mod home {
    use std::path::{Path, PathBuf};
    use std::process::Command;

    use anyhow::{Context, Result, anyhow};

    /// Isolated home directory plus a fresh git repository for end-to-end tests.
    ///
    /// Requires `git` on `PATH`.
    pub struct TestHome {
        home: tempfile::TempDir,
        repo: PathBuf,
    }

    impl TestHome {
        pub fn new() -> Result<Self> {
            let home = tempfile::tempdir().context("create temp home")?;
            let repo = home.path().join("repo");
            std::fs::create_dir_all(&repo).context("create repo dir")?;
            let home = Self { home, repo };
            let status = home
                .git(&["init", "--quiet"])
                .status()
                .context("spawn git init")?;
            if !status.success() {
                return Err(anyhow!("git init failed"));
            }
            Ok(home)
        }

        pub fn home(&self) -> &Path {
            self.home.path()
        }

        pub fn settings_dir(&self) -> PathBuf {
            self.home().join(".config").join("git-team")
        }

        /// Point `cmd` at the isolated home and run it inside the repository.
        pub fn isolate(&self, cmd: &mut Command) {
            cmd.current_dir(&self.repo)
                .env("HOME", self.home())
                .env("XDG_CONFIG_HOME", self.home().join(".config"))
                .env("GIT_CONFIG_NOSYSTEM", "1")
                .env_remove("GIT_CONFIG_GLOBAL")
                .env_remove("GIT_DIR")
                .env_remove("RUST_LOG")
                .env_remove(crate::io::config::CONFIG_DIR_ENV);
        }

        pub fn git(&self, args: &[&str]) -> Command {
            let mut cmd = Command::new("git");
            cmd.args(args);
            self.isolate(&mut cmd);
            cmd
        }

        /// `git config <args>` stdout, trimmed; `None` if git reports an error.
        pub fn git_config(&self, args: &[&str]) -> Result<Option<String>> {
            let mut full = vec!["config"];
            full.extend_from_slice(args);
            let out = self.git(&full).output().context("spawn git config")?;
            if !out.status.success() {
                return Ok(None);
            }
            Ok(Some(String::from_utf8_lossy(&out.stdout).trim().to_string()))
        }
    }
}
