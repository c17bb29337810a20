//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;
use vidgrab_core::MediaFormat;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Interface to bind
        #[arg(long, env = "VIDGRAB_HOST", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "VIDGRAB_PORT", default_value_t = 8000)]
        port: u16,
        /// Directory with built frontend assets, served with SPA fallback
        #[arg(long, env = "VIDGRAB_STATIC_DIR")]
        static_dir: Option<PathBuf>,
        /// Comma-separated CORS origins (default: allow all)
        #[arg(long, env = "VIDGRAB_ALLOWED_ORIGINS", value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },

    /// Print title, duration and available qualities as JSON
    Info {
        /// Video page URL
        url: String,
    },

    /// Download a video as MP3 or MP4
    Download {
        /// Video page URL
        url: String,
        /// Output format: mp3 or mp4
        #[arg(short, long, default_value = "mp4")]
        format: MediaFormat,
        /// Directory to save the file in
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Show the resolved yt-dlp executable and its version
    CheckTool,

    /// Show resolved paths
    Paths,
}
