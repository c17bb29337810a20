//! Argument templates for yt-dlp invocations.

use std::path::Path;

use vidgrab_core::MediaFormat;

/// Output template, relative to the job directory.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Best MP4 video with M4A audio, else best MP4, else anything mergeable.
const VIDEO_FORMAT_SELECTOR: &str = "bv*[ext=mp4]+ba[ext=m4a]/b[ext=mp4] / bv*+ba/b";

/// Arguments for a metadata dump of `url`.
pub fn metadata_args(url: &str, extractor_args: Option<&str>) -> Vec<String> {
    let mut args = vec!["--dump-json".to_string(), "--no-playlist".to_string()];
    push_extractor_args(&mut args, extractor_args);
    push_url(&mut args, url);
    args
}

/// Arguments for downloading `url` as `format` into `output_dir`.
pub fn download_args(
    url: &str,
    format: MediaFormat,
    output_dir: &Path,
    extractor_args: Option<&str>,
) -> Vec<String> {
    let template = output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned();

    let mut args: Vec<String> = match format {
        MediaFormat::Audio => vec![
            "-x".into(),
            "--audio-format".into(),
            "mp3".into(),
            "--audio-quality".into(),
            "0".into(),
            "-o".into(),
            template,
            "--no-playlist".into(),
            "--no-warnings".into(),
        ],
        MediaFormat::Video => vec![
            "-f".into(),
            VIDEO_FORMAT_SELECTOR.into(),
            "--merge-output-format".into(),
            "mp4".into(),
            "-o".into(),
            template,
            "--no-playlist".into(),
        ],
    };

    // File mtime = write time, and the final path goes to stdout.
    args.extend([
        "--no-mtime".into(),
        "--print".into(),
        "after_move:filepath".into(),
    ]);
    push_extractor_args(&mut args, extractor_args);
    push_url(&mut args, url);
    args
}

/// The URL always follows `--`, so a value starting with `-` is never
/// parsed as an option.
fn push_url(args: &mut Vec<String>, url: &str) {
    args.push("--".into());
    args.push(url.to_string());
}

fn push_extractor_args(args: &mut Vec<String>, extractor_args: Option<&str>) {
    if let Some(hint) = extractor_args.filter(|hint| !hint.trim().is_empty()) {
        args.push("--extractor-args".into());
        args.push(hint.to_string());
    }
}
