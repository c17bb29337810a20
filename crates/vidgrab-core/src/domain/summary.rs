//! Normalized video summaries returned to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metadata::{ToolFormat, ToolMetadata};

/// Title used when the downloader reports none.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Extension assumed when an encoding reports none.
const DEFAULT_EXT: &str = "mp4";

/// Heights offered when the downloader reports no video encodings at all.
const PLACEHOLDER_HEIGHTS: [u32; 4] = [1080, 720, 480, 360];

/// One selectable quality, keyed by vertical resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOption {
    /// Display label, e.g. `"1080p"`.
    #[serde(rename = "quality")]
    pub quality_label: String,
    pub height: u32,
    #[serde(rename = "ext")]
    pub extension: String,
    #[serde(rename = "filesize")]
    pub file_size_bytes: Option<u64>,
    pub has_audio: bool,
}

impl FormatOption {
    fn from_tool(height: u32, format: &ToolFormat) -> Self {
        Self {
            quality_label: format!("{height}p"),
            height,
            extension: format
                .ext
                .clone()
                .filter(|ext| !ext.is_empty())
                .unwrap_or_else(|| DEFAULT_EXT.to_string()),
            file_size_bytes: format.size_bytes(),
            has_audio: format.has_audio(),
        }
    }
}

/// What the info endpoint reports about one video.
///
/// Field names on the wire match what the browser UI reads
/// (`thumbnail`, `duration`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub title: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    /// Sorted by height, descending, one entry per height.
    pub formats: Vec<FormatOption>,
    /// `true` when `formats` is the fixed [`placeholder_formats`] list
    /// rather than something the downloader actually reported.
    pub placeholder_formats: bool,
}

impl VideoSummary {
    /// Build a summary from the downloader's metadata.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_metadata(metadata: ToolMetadata) -> Self {
        let mut formats = normalize_formats(&metadata.formats);
        let placeholder = formats.is_empty();
        if placeholder {
            formats = placeholder_formats();
        }

        Self {
            title: metadata
                .title
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            thumbnail_url: metadata.thumbnail,
            duration_seconds: metadata
                .duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .map_or(0, |d| d as u64),
            formats,
            placeholder_formats: placeholder,
        }
    }
}

/// Collapse the downloader's encodings into one option per height.
///
/// Encodings without a positive height are audio-only and skipped. When
/// several encodings share a height the first one reported wins.
pub fn normalize_formats(formats: &[ToolFormat]) -> Vec<FormatOption> {
    let mut by_height: BTreeMap<u32, FormatOption> = BTreeMap::new();

    for format in formats {
        let Some(height) = format.video_height() else {
            continue;
        };
        by_height
            .entry(height)
            .or_insert_with(|| FormatOption::from_tool(height, format));
    }

    by_height.into_values().rev().collect()
}

/// Fixed list shown when no video encodings were reported.
///
/// This is a UI placeholder: none of these qualities has been checked
/// against the actual video, and every size is unknown.
pub fn placeholder_formats() -> Vec<FormatOption> {
    PLACEHOLDER_HEIGHTS
        .iter()
        .map(|&height| FormatOption {
            quality_label: format!("{height}p"),
            height,
            extension: DEFAULT_EXT.to_string(),
            file_size_bytes: None,
            has_audio: true,
        })
        .collect()
}
