//! Check-tool command handler.

use tracing::warn;
use vidgrab_core::VideoError;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the resolved yt-dlp executable and its version.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let not_found = |detail: String| VideoError::ToolNotFound {
        tool: ctx.tool.display_name(),
        detail,
    };

    let path = ctx.tool.resolve().map_err(|e| {
        warn!(target: "vidgrab.tool", error = %e, "yt-dlp lookup failed");
        not_found(e.to_string())
    })?;
    let version = ctx
        .tool
        .version(&path)
        .await
        .map_err(|e| not_found(e.to_string()))?;

    println!("path = {}", path.display());
    println!("version = {version}");
    Ok(())
}
