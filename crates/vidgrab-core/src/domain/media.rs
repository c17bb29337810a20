//! Download targets and request validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::VideoError;

/// Message returned for any malformed info request.
pub(crate) const INVALID_URL_MSG: &str = "Invalid URL provided";

/// Message returned for any malformed download request.
pub(crate) const INVALID_PARAMS_MSG: &str = "Invalid parameters provided";

/// What the caller wants back from a download.
///
/// On the wire the variants are spelled by their container format
/// (`"mp3"` and `"mp4"`), which is what the browser UI sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    /// Audio only, transcoded to MP3.
    #[serde(rename = "mp3")]
    Audio,
    /// Best MP4-compatible video and audio, merged without re-encoding.
    #[serde(rename = "mp4")]
    Video,
}

impl MediaFormat {
    /// File extension of the produced media.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Video => "mp4",
        }
    }

    /// Upper-case label used in user-facing messages ("MP3", "MP4").
    pub const fn label(self) -> &'static str {
        match self {
            Self::Audio => "MP3",
            Self::Video => "MP4",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for MediaFormat {
    type Err = VideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp3" => Ok(Self::Audio),
            "mp4" => Ok(Self::Video),
            _ => Err(VideoError::invalid_params()),
        }
    }
}

/// A validated download request.
///
/// Built from the raw body of one HTTP call (or CLI invocation) and
/// discarded once the handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: Url,
    pub format: MediaFormat,
}

impl DownloadRequest {
    /// Validate raw input.
    ///
    /// The URL must parse as an absolute `http` or `https` URL with a host,
    /// and the format must be `mp3` or `mp4`.
    pub fn parse(url: &str, format: &str) -> Result<Self, VideoError> {
        let invalid = VideoError::invalid_params;

        let url = Url::parse(url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }

        let format = format.trim().parse()?;
        Ok(Self { url, format })
    }
}

/// Validate the URL of an info request.
///
/// Info lookups accept any non-blank string; whether it names a video is
/// for the downloader to decide.
pub fn validate_info_url(url: &str) -> Result<&str, VideoError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(VideoError::invalid_url());
    }
    Ok(trimmed)
}
