//! Deterministic, pure logic shared by the git-team policies.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod coauthor;
pub mod render;
pub mod types;
