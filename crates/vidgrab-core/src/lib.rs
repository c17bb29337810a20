//! # vidgrab-core
//!
//! Domain types, services and port definitions for vidgrab.
//!
//! This crate knows nothing about HTTP or about how the external downloader
//! is spawned. Adapters (`vidgrab-axum`, `vidgrab-cli`) call the services in
//! [`services`]; the runtime crate (`vidgrab-runtime`) implements
//! [`ports::MediaToolPort`].
//!
//! - [`domain`] - request and summary types, metadata normalization
//! - [`error`] - the request-level error taxonomy
//! - [`ports`] - the external downloader abstraction
//! - [`scratch`] - scratch directory sweeping and per-request job directories
//! - [`services`] - the info resolver and download orchestrator

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod scratch;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    DownloadRequest, FormatOption, MediaFormat, ToolFormat, ToolMetadata, VideoSummary,
    placeholder_formats, validate_info_url,
};
pub use error::{ErrorKind, VideoError};
pub use paths::default_scratch_dir;
pub use ports::{DownloadOutput, MediaToolPort, ToolError};
pub use scratch::{ScratchDir, ScratchError, ScratchJob, SweepReport};
pub use services::{DownloadOrchestrator, DownloadSettings, DownloadedFile, InfoResolver};
