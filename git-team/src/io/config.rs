//! git-team settings stored under `~/.config/git-team/settings.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::ActivationScope;
use crate::io::git::Git;

/// Overrides the git-team configuration directory.
pub const CONFIG_DIR_ENV: &str = "GIT_TEAM_CONFIG_DIR";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const TEMPLATE_FILE_NAME: &str = "COMMIT_TEMPLATE";
pub const DEFAULT_HOOKS_PATH: &str = "/usr/local/etc/git-team/hooks";

/// git-team settings (TOML).
///
/// Missing fields default to the packaged locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory containing the git-team managed hooks; `core.hooksPath` points here.
    pub hooks_path: PathBuf,

    /// Root directory for global commit templates. Defaults to
    /// `<config dir>/commit-templates`.
    pub template_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hooks_path: PathBuf::from(DEFAULT_HOOKS_PATH),
            template_dir: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.hooks_path.as_os_str().is_empty() {
            return Err(anyhow!("hooks_path must not be empty"));
        }
        if let Some(dir) = &self.template_dir
            && dir.as_os_str().is_empty()
        {
            return Err(anyhow!("template_dir must not be empty when set"));
        }
        Ok(())
    }
}

/// Resolve the git-team configuration directory.
///
/// `GIT_TEAM_CONFIG_DIR` wins; otherwise `~/.config/git-team`.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".config").join("git-team"))
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `Settings::default()`.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        let settings = Settings::default();
        settings.validate()?;
        return Ok(settings);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Where the commit template and the managed hooks live.
pub trait CommitSettings {
    /// Path of the commit template for the given activation scope.
    fn template_path(&self, scope: ActivationScope) -> Result<PathBuf>;
    /// Directory `core.hooksPath` is pointed at while git-team is enabled.
    fn hooks_path(&self) -> PathBuf;
}

/// [`CommitSettings`] derived from [`Settings`] and the current repository.
#[derive(Debug, Clone)]
pub struct StaticCommitSettings {
    config_dir: PathBuf,
    settings: Settings,
    git: Git,
}

impl StaticCommitSettings {
    pub fn new(config_dir: impl Into<PathBuf>, settings: Settings, git: Git) -> Self {
        Self {
            config_dir: config_dir.into(),
            settings,
            git,
        }
    }

    fn template_dir(&self) -> PathBuf {
        self.settings
            .template_dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join("commit-templates"))
    }
}

impl CommitSettings for StaticCommitSettings {
    fn template_path(&self, scope: ActivationScope) -> Result<PathBuf> {
        match scope {
            ActivationScope::Global => Ok(self
                .template_dir()
                .join("global")
                .join(TEMPLATE_FILE_NAME)),
            ActivationScope::RepoLocal => {
                let git_dir = self
                    .git
                    .absolute_git_dir()
                    .context("locate repository for repo-local commit template")?;
                Ok(git_dir.join("git-team").join(TEMPLATE_FILE_NAME))
            }
        }
    }

    fn hooks_path(&self) -> PathBuf {
        self.settings.hooks_path.clone()
    }
}
