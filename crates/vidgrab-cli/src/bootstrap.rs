//! CLI bootstrap - the composition root for terminal commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use vidgrab_core::{DownloadOrchestrator, InfoResolver, MediaToolPort, ScratchDir, default_scratch_dir};
use vidgrab_runtime::{ToolConfig, YtDlp};

use crate::parser::Cli;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub tool: ToolConfig,
    pub scratch_dir: PathBuf,
}

impl CliConfig {
    /// Build from the global command-line options.
    pub fn from_cli(cli: &Cli) -> Self {
        let tool = ToolConfig::default()
            .with_program(cli.yt_dlp.clone())
            .with_extractor_args(Some(cli.extractor_args.clone()))
            .with_info_timeout(Duration::from_secs(cli.info_timeout_secs))
            .with_download_timeout(Duration::from_secs(cli.download_timeout_secs));

        Self {
            tool,
            scratch_dir: cli.scratch_dir.clone().unwrap_or_else(default_scratch_dir),
        }
    }
}

/// Services available to command handlers.
pub struct CliContext {
    pub config: CliConfig,
    pub tool: Arc<dyn MediaToolPort>,
    pub info: InfoResolver,
    pub downloads: DownloadOrchestrator,
}

/// Wire the yt-dlp adapter into the core services.
pub fn bootstrap(config: CliConfig) -> CliContext {
    debug!(
        target: "vidgrab.paths",
        scratch_dir = %config.scratch_dir.display(),
        program = %config.tool.program,
        "CLI bootstrap"
    );

    let tool: Arc<dyn MediaToolPort> = Arc::new(YtDlp::new(config.tool.clone()));
    let scratch = ScratchDir::new(&config.scratch_dir);

    CliContext {
        info: InfoResolver::new(Arc::clone(&tool)),
        downloads: DownloadOrchestrator::new(Arc::clone(&tool), scratch),
        tool,
        config,
    }
}
