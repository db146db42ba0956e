//! End-to-end tests for the `git-team` binary.
//!
//! Spawns the binary against a real git installation with an isolated `HOME`
//! and a fresh repository. Skipped when `git` is not on `PATH`.

use std::fs;
use std::process::{Command, Output};

use git_team::exit_codes;
use git_team::test_support::TestHome;

const MR: &str = "Mr. Noujz <noujz@mr.se>";

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn setup() -> Option<TestHome> {
    if !git_available() {
        eprintln!("git not found; skipping");
        return None;
    }
    let home = TestHome::new().expect("test home");
    let hooks = home.home().join("hooks");
    fs::create_dir_all(home.settings_dir()).expect("settings dir");
    fs::write(
        home.settings_dir().join("settings.toml"),
        format!("hooks_path = {:?}\n", hooks.display().to_string()),
    )
    .expect("settings");
    Some(home)
}

fn git_team(home: &TestHome, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_git-team"));
    cmd.args(args);
    home.isolate(&mut cmd);
    cmd.output().expect("run git-team")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn alias_enable_disable_round() {
    let Some(home) = setup() else { return };

    let out = git_team(&home, &["add", "mr", MR]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "Alias 'mr' -> 'Mr. Noujz <noujz@mr.se>' has been added.\n"
    );
    assert_eq!(
        home.git_config(&["--global", "team.alias.mr"]).expect("git config"),
        Some(MR.to_string())
    );

    let out = git_team(&home, &["ls"]);
    assert_eq!(
        stdout(&out),
        "Aliases:\n--------\n'mr' -> 'Mr. Noujz <noujz@mr.se>'\n"
    );

    let out = git_team(&home, &["enable", "mr"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "git-team enabled\n\nco-authors\n├── Mr. Noujz <noujz@mr.se>\n"
    );
    let template = home
        .settings_dir()
        .join("commit-templates")
        .join("global")
        .join("COMMIT_TEMPLATE");
    assert_eq!(
        fs::read_to_string(&template).expect("template"),
        "\n\nCo-authored-by: Mr. Noujz <noujz@mr.se>"
    );
    assert_eq!(
        home.git_config(&["--global", "commit.template"]).expect("git config"),
        Some(template.display().to_string())
    );

    let out = git_team(&home, &[]);
    assert_eq!(
        stdout(&out),
        "git-team enabled\n\nco-authors\n├── Mr. Noujz <noujz@mr.se>\n"
    );

    let out = git_team(&home, &["disable"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(stdout(&out), "git-team disabled\n");
    assert!(!template.exists());
    assert_eq!(
        home.git_config(&["--global", "commit.template"]).expect("git config"),
        None
    );
    assert_eq!(
        home.git_config(&["--global", "core.hooksPath"]).expect("git config"),
        None
    );

    let out = git_team(&home, &["rm", "mr"]);
    assert_eq!(stdout(&out), "Alias 'mr' has been removed.\n");
}

#[test]
fn disable_restores_a_previous_hooks_path() {
    let Some(home) = setup() else { return };
    let status = home
        .git(&["config", "--global", "core.hooksPath", "/my/own/hooks"])
        .status()
        .expect("git config");
    assert!(status.success());

    let out = git_team(&home, &["enable", MR]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_ne!(
        home.git_config(&["--global", "core.hooksPath"]).expect("git config"),
        Some("/my/own/hooks".to_string())
    );

    let out = git_team(&home, &["disable"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(
        home.git_config(&["--global", "core.hooksPath"]).expect("git config"),
        Some("/my/own/hooks".to_string())
    );
}

#[test]
fn repo_local_activation_writes_into_the_repository() {
    let Some(home) = setup() else { return };

    let out = git_team(&home, &["config", "activation-scope", "repo-local"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    let out = git_team(&home, &["config"]);
    assert_eq!(stdout(&out), "config\n└── activation-scope: repo-local\n");

    let out = git_team(&home, &["enable", MR]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));

    let template = home
        .git_config(&["--local", "commit.template"])
        .expect("git config")
        .expect("local commit.template");
    assert!(template.ends_with("git-team/COMMIT_TEMPLATE"), "{template}");
    assert!(std::path::Path::new(&template).exists());
    assert_eq!(
        home.git_config(&["--global", "commit.template"]).expect("git config"),
        None
    );

    let out = git_team(&home, &["disable"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert!(!std::path::Path::new(&template).exists());
}

#[test]
fn invalid_coauthor_fails_with_error_exit() {
    let Some(home) = setup() else { return };

    let out = git_team(&home, &["enable", "Foo Bar"]);
    assert_eq!(out.status.code(), Some(exit_codes::FAILURE));
    assert_eq!(stderr(&out), "error: not a valid coauthor: Foo Bar\n");
    assert!(stdout(&out).is_empty());
}

#[test]
fn unknown_alias_removal_is_not_an_error() {
    let Some(home) = setup() else { return };

    let out = git_team(&home, &["rm", "ghost"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&out), "No such alias: 'ghost'.\n");
}

#[test]
fn malformed_settings_only_block_enable() {
    let Some(home) = setup() else { return };
    let out = git_team(&home, &["enable", MR]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    let status = home
        .git(&["config", "--global", "team.alias.mr", MR])
        .status()
        .expect("git config");
    assert!(status.success());

    fs::write(home.settings_dir().join("settings.toml"), "hooks_path = [\n").expect("settings");

    let out = git_team(&home, &["ls"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "Aliases:\n--------\n'mr' -> 'Mr. Noujz <noujz@mr.se>'\n"
    );

    let out = git_team(&home, &["enable", "mr"]);
    assert_eq!(out.status.code(), Some(exit_codes::FAILURE));
    assert!(
        stderr(&out).starts_with("error: failed to load settings: parse "),
        "{}",
        stderr(&out)
    );

    let out = git_team(&home, &["disable"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(stdout(&out), "git-team disabled\n");
    assert_eq!(
        home.git_config(&["--global", "core.hooksPath"]).expect("git config"),
        None
    );

    let out = git_team(&home, &["rm", "mr"]);
    assert_eq!(out.status.code(), Some(exit_codes::OK), "{}", stderr(&out));
    assert_eq!(stdout(&out), "Alias 'mr' has been removed.\n");
}
