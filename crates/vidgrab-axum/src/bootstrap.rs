//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the yt-dlp adapter is wired into
//! the core services for the web adapter.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use vidgrab_core::{
    DownloadOrchestrator, InfoResolver, MediaToolPort, ScratchDir, default_scratch_dir,
};
use vidgrab_runtime::{ToolConfig, YtDlp};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Root under which per-request job directories are created.
    pub scratch_dir: PathBuf,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// How yt-dlp is located and invoked.
    pub tool: ToolConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            scratch_dir: default_scratch_dir(),
            static_dir: None,
            cors: CorsConfig::default(),
            tool: ToolConfig::default(),
        }
    }

    #[must_use]
    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_dir = path.into();
        self
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins. An empty list allows all.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = if origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(origins)
        };
        self
    }

    #[must_use]
    pub fn with_tool(mut self, tool: ToolConfig) -> Self {
        self.tool = tool;
        self
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
///
/// Holds the initialized services shared by every handler.
pub struct AxumContext {
    /// Metadata lookups.
    pub info: InfoResolver,
    /// Downloads into the scratch directory.
    pub downloads: DownloadOrchestrator,
    /// The downloader, for the status endpoint.
    pub tool: Arc<dyn MediaToolPort>,
}

impl AxumContext {
    /// Build the services around an already constructed tool.
    pub fn new(tool: Arc<dyn MediaToolPort>, scratch: ScratchDir) -> Self {
        Self {
            info: InfoResolver::new(Arc::clone(&tool)),
            downloads: DownloadOrchestrator::new(Arc::clone(&tool), scratch),
            tool,
        }
    }
}

/// Bootstrap the Axum server with all services.
///
/// A missing downloader is not fatal: it is logged here and reported to
/// callers per request, so installing it later needs no restart.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let scratch = ScratchDir::new(&config.scratch_dir);
    scratch
        .ensure()
        .await
        .with_context(|| format!("Failed to prepare scratch directory {}", config.scratch_dir.display()))?;

    info!(
        target: "vidgrab.paths",
        scratch_dir = %scratch.root().display(),
        static_dir = ?config.static_dir,
        "Axum bootstrap resolved paths"
    );

    let tool: Arc<dyn MediaToolPort> = Arc::new(YtDlp::new(config.tool.clone()));
    match tool.resolve() {
        Ok(path) => info!(target: "vidgrab.tool", path = %path.display(), "Using yt-dlp"),
        Err(e) => warn!(
            target: "vidgrab.tool",
            error = %e,
            "yt-dlp not found; requests will fail until it is installed"
        ),
    }

    Ok(AxumContext::new(tool, scratch))
}

/// Start the web server.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;

    // Choose router based on whether static serving is configured
    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    let addr = listener.local_addr()?;

    if config.static_dir.is_some() {
        info!("vidgrab web server (with UI) listening on http://{}", addr);
    } else {
        info!("vidgrab web server (API only) listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
