//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for vidgrab.
///
/// Global options configure the downloader and scratch directory for
/// every subcommand.
#[derive(Debug, Parser)]
#[command(name = "vidgrab")]
#[command(about = "Fetch video info and download MP3/MP4 files through yt-dlp")]
#[command(version)]
pub struct Cli {
    /// yt-dlp executable: a bare name searched in the usual locations and on PATH, or a path
    #[arg(long = "yt-dlp", env = "VIDGRAB_YTDLP", default_value = "yt-dlp", global = true)]
    pub yt_dlp: String,

    /// Value for yt-dlp's --extractor-args (empty to omit the flag)
    #[arg(
        long,
        env = "VIDGRAB_EXTRACTOR_ARGS",
        default_value = vidgrab_runtime::ytdlp::DEFAULT_EXTRACTOR_ARGS,
        global = true
    )]
    pub extractor_args: String,

    /// Directory for in-flight downloads
    #[arg(long, env = "VIDGRAB_SCRATCH_DIR", global = true)]
    pub scratch_dir: Option<PathBuf>,

    /// Seconds to wait for a metadata lookup
    #[arg(long = "info-timeout", env = "VIDGRAB_INFO_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub info_timeout_secs: u64,

    /// Seconds to wait for a download
    #[arg(
        long = "download-timeout",
        env = "VIDGRAB_DOWNLOAD_TIMEOUT_SECS",
        default_value_t = 300,
        global = true
    )]
    pub download_timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
