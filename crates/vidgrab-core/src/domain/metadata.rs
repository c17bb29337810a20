//! Raw metadata as emitted by the downloader's JSON dump.
//!
//! Only the fields vidgrab reads are modelled; everything else in the
//! (very large) document is ignored. Numeric fields are read as `f64`
//! because the downloader occasionally reports fractional durations and
//! approximate sizes.

use serde::Deserialize;

use crate::error::VideoError;

/// Top-level metadata object for one video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub formats: Vec<ToolFormat>,
}

/// One encoding reported by the downloader.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolFormat {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub filesize: Option<f64>,
    #[serde(default)]
    pub filesize_approx: Option<f64>,
    #[serde(default)]
    pub acodec: Option<String>,
}

impl ToolMetadata {
    /// Parse the downloader's standard output.
    ///
    /// Anything other than a non-empty JSON object is a parse failure.
    pub fn from_json(stdout: &str) -> Result<Self, VideoError> {
        let value: serde_json::Value =
            serde_json::from_str(stdout.trim()).map_err(|e| VideoError::ParseFailed {
                reason: e.to_string(),
            })?;

        match &value {
            serde_json::Value::Object(map) if !map.is_empty() => {}
            other => {
                return Err(VideoError::ParseFailed {
                    reason: format!("expected a non-empty JSON object, got {}", kind_of(other)),
                });
            }
        }

        serde_json::from_value(value).map_err(|e| VideoError::ParseFailed {
            reason: e.to_string(),
        })
    }
}

impl ToolFormat {
    /// Vertical resolution, if this encoding carries video.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn video_height(&self) -> Option<u32> {
        self.height
            .filter(|h| h.is_finite() && *h >= 1.0)
            .map(|h| h.min(f64::from(u32::MAX)) as u32)
    }

    /// Exact size when known, otherwise the approximate one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn size_bytes(&self) -> Option<u64> {
        self.filesize
            .or(self.filesize_approx)
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s as u64)
    }

    /// Whether the encoding has an audio track.
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref().is_some_and(|codec| codec != "none")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ToolFormat>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ToolFormat>>::deserialize(deserializer)?.unwrap_or_default())
}

const fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an empty object",
    }
}
