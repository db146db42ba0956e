//! git-team: manage co-authors for git commits.
//!
//! Parses the command line, wires the git-config backed adapters into the
//! matching policy, maps the resulting event to effects and runs them.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use git_team::core::coauthor::sanity_check_coauthors;
use git_team::effects::run_effects;
use git_team::exit_codes;
use git_team::io::activation::GitConfigTeamConfig;
use git_team::io::alias::GitConfigAliasResolver;
use git_team::io::config::{
    SETTINGS_FILE_NAME, StaticCommitSettings, default_config_dir, load_settings,
};
use git_team::io::fs::OsFileSystem;
use git_team::io::git::Git;
use git_team::io::gitconfig::GitConfig;
use git_team::io::prompt::StdinPrompt;
use git_team::io::state::GitConfigStateRepository;
use git_team::logging;
use git_team::mapper::map_event;
use git_team::policy::enable::EnableEvent;
use git_team::policy::{Event, add, config, disable, enable, list, remove, status};

#[derive(Parser)]
#[command(
    name = "git-team",
    version,
    about = "Inject co-authors into your commit messages"
)]
struct Cli {
    /// Defaults to `status`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Enable injection of the given co-authors into every commit message.
    Enable {
        /// Aliases or co-authors of the shape "Name <email>".
        coauthors: Vec<String>,
        /// Also enable every assigned alias.
        #[arg(short = 'A', long)]
        all: bool,
    },
    /// Disable co-author injection.
    Disable,
    /// Print the current status.
    Status,
    /// List all alias assignments.
    #[command(visible_alias = "list")]
    Ls,
    /// Assign a co-author to an alias.
    Add {
        alias: String,
        /// Co-author of the shape "Name <email>".
        coauthor: String,
        /// Replace an existing assignment without asking.
        #[arg(short = 'f', long)]
        force_override: bool,
    },
    /// Remove an alias assignment.
    Rm { alias: String },
    /// Show or change the git-team configuration.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Activate git-team per user (`global`) or per repository (`repo-local`).
    ActivationScope { scope: String },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let git = Git::from_current_dir()?;
    let store = GitConfig::new(git.clone());
    let team_config = GitConfigTeamConfig::new(&store);
    let state = GitConfigStateRepository::new(&store);
    let status_deps = status::Dependencies {
        config_reader: &team_config,
        state_reader: &state,
    };

    let event: Event = match cli.command.unwrap_or(Command::Status) {
        Command::Enable { coauthors, all } => {
            let commit_settings = match load_commit_settings(&git) {
                Ok(commit_settings) => commit_settings,
                Err(err) => {
                    let err = err.context("failed to load settings");
                    return finish(EnableEvent::Failed(vec![err]).into(), &status_deps);
                }
            };
            let resolver = GitConfigAliasResolver::new(&store);
            let deps = enable::Dependencies {
                sanity_check_coauthors,
                alias_resolver: &resolver,
                git_config_reader: &store,
                git_config_writer: &store,
                config_reader: &team_config,
                commit_settings: &commit_settings,
                fs: &OsFileSystem,
                state_reader: &state,
                state_writer: &state,
                activation_validator: &git,
            };
            let req = enable::Request {
                aliases_and_coauthors: coauthors,
                use_all: all,
            };
            enable::apply(&deps, &req).into()
        }
        Command::Disable => {
            let deps = disable::Dependencies {
                git_config_reader: &store,
                git_config_writer: &store,
                config_reader: &team_config,
                fs: &OsFileSystem,
                state_reader: &state,
                state_writer: &state,
                activation_validator: &git,
            };
            disable::apply(&deps).into()
        }
        Command::Status => status::apply(&status_deps).into(),
        Command::Ls => list::apply(&list::Dependencies {
            git_config_reader: &store,
        })
        .into(),
        Command::Add {
            alias,
            coauthor,
            force_override,
        } => {
            let deps = add::Dependencies {
                git_config_reader: &store,
                git_config_writer: &store,
                prompt: &StdinPrompt,
            };
            let req = add::Request {
                alias,
                coauthor,
                force_override,
            };
            add::apply(&deps, &req).into()
        }
        Command::Rm { alias } => {
            let deps = remove::Dependencies {
                git_config_reader: &store,
                git_config_writer: &store,
            };
            remove::apply(&deps, &remove::Request { alias }).into()
        }
        Command::Config { action } => {
            let deps = config::Dependencies {
                config_reader: &team_config,
                config_writer: &team_config,
            };
            let req = match action {
                None => config::Request::Show,
                Some(ConfigAction::ActivationScope { scope }) => {
                    config::Request::SetActivationScope(scope)
                }
            };
            config::apply(&deps, &req).into()
        }
    };

    finish(event, &status_deps)
}

/// Settings are only needed to enable; other commands must work without them.
fn load_commit_settings(git: &Git) -> Result<StaticCommitSettings> {
    let config_dir = default_config_dir()?;
    let settings = load_settings(&config_dir.join(SETTINGS_FILE_NAME))?;
    debug!(config_dir = %config_dir.display(), "loaded settings");
    Ok(StaticCommitSettings::new(config_dir, settings, git.clone()))
}

fn finish(event: Event, status_deps: &status::Dependencies<'_>) -> Result<i32> {
    let query_status = || status::apply(status_deps);
    let effects = map_event(&event, &query_status);
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_effects(&effects, &mut stdout.lock(), &mut stderr.lock()).context("write output")
}
