//! Domain types for vidgrab.
//!
//! These types describe what a caller asks for and what the downloader
//! reports back. They carry no I/O.

mod media;
mod metadata;
mod summary;

pub(crate) use media::{INVALID_PARAMS_MSG, INVALID_URL_MSG};
pub use media::{DownloadRequest, MediaFormat, validate_info_url};
pub use metadata::{ToolFormat, ToolMetadata};
pub use summary::{FormatOption, VideoSummary, normalize_formats, placeholder_formats};
