//! # vidgrab-runtime
//!
//! Process runtime for vidgrab: locating the `yt-dlp` executable and
//! running it as a child process. [`YtDlp`] is the production
//! implementation of [`vidgrab_core::MediaToolPort`].

#![deny(unsafe_code)]

pub mod process;
pub mod ytdlp;

pub use process::{CapturedOutput, run_captured};
pub use ytdlp::{LocateError, ToolConfig, ToolLocator, YtDlp};
