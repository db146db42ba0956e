//! Stable exit codes for git-team commands.

/// Command succeeded, including "nothing to do" outcomes.
pub const OK: i32 = 0;
/// Command failed; the reasons were printed to stderr.
pub const FAILURE: i32 = 1;
