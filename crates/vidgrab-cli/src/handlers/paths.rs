//! Paths command handler.
//!
//! Displays resolved paths for diagnostics.

use crate::bootstrap::CliContext;

/// Print resolved paths in `key = value` format.
pub fn execute(ctx: &CliContext) {
    println!("scratch_dir = {}", ctx.config.scratch_dir.display());
    println!("yt_dlp = {}", ctx.config.tool.program);
    match ctx.tool.resolve() {
        Ok(path) => println!("yt_dlp_resolved = {}", path.display()),
        Err(_) => println!("yt_dlp_resolved = (not found)"),
    }
}
