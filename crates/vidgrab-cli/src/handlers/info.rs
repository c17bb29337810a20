//! Info command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the video summary as pretty JSON.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let summary = ctx.info.resolve(url).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    if summary.placeholder_formats {
        eprintln!("note: yt-dlp reported no video formats; qualities shown are placeholders");
    }
    Ok(())
}
