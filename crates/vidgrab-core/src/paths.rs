//! Default filesystem locations.

use std::path::PathBuf;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "vidgrab";

/// Default scratch root.
///
/// Resolution order:
/// 1. Local data directory (e.g. `~/.local/share/vidgrab/scratch`)
/// 2. System temp directory (`/tmp/vidgrab`)
pub fn default_scratch_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || std::env::temp_dir().join(APP_DIR),
        |dir| dir.join(APP_DIR).join("scratch"),
    )
}
