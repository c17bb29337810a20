//! Command handlers.
//!
//! Handlers are thin: validate CLI input, call a core service through
//! [`crate::CliContext`], format the result for the terminal.

pub mod check_tool;
pub mod download;
pub mod info;
pub mod paths;
pub mod serve;
