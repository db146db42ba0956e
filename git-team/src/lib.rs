//! Co-author management for git commits.
//!
//! git-team keeps a commit message template with `Co-authored-by:` trailers
//! and points git's `commit.template` and `core.hooksPath` at it while
//! enabled. All state lives in git's own config, either globally or in the
//! current repository. The crate enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (validation, de-duplication,
//!   rendering). No I/O.
//! - **[`io`]**: Side-effecting adapters (git subprocess, scoped git config,
//!   filesystem, settings, prompt) behind traits so tests can substitute fakes.
//! - **[`policy`]**: One decision function per command, mapping injected
//!   dependencies and a request to a single terminal event.
//!
//! [`mapper`] turns events into [`effects`], which the binary runs.

pub mod core;
pub mod effects;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod mapper;
pub mod policy;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
