//! Download command handler.

use std::path::Path;

use tracing::info;
use vidgrab_core::{DownloadRequest, MediaFormat};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Download `url` and move the result into `out`.
pub async fn execute(
    ctx: &CliContext,
    url: &str,
    format: MediaFormat,
    out: &Path,
) -> Result<(), CliError> {
    let request = DownloadRequest::parse(url, format.extension())?;

    tokio::fs::create_dir_all(out).await?;
    println!("Downloading {} as {}...", request.url, format.label());

    let file = ctx.downloads.download(&request).await?;
    let size = file.size();
    let saved = file.persist_to(out).await?;

    info!(target: "vidgrab.download", path = %saved.display(), bytes = size, "Saved download");
    println!("Saved {} ({size} bytes)", saved.display());
    Ok(())
}
