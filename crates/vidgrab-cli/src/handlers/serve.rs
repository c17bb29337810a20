//! Serve command handler.

use std::path::PathBuf;

use vidgrab_axum::{ServerConfig, start_server};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Options of the `serve` subcommand.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
}

/// Build the server configuration from CLI settings.
pub fn server_config(config: &CliConfig, options: ServeOptions) -> ServerConfig {
    let mut server = ServerConfig::with_defaults()
        .with_bind(options.host, options.port)
        .with_scratch_dir(&config.scratch_dir)
        .with_tool(config.tool.clone())
        .with_allowed_origins(
            options
                .allowed_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        );
    if let Some(dir) = options.static_dir {
        server = server.with_static_dir(dir);
    }
    server
}

/// Run the web server until interrupted.
pub async fn execute(config: &CliConfig, options: ServeOptions) -> Result<(), CliError> {
    let server = server_config(config, options);

    println!();
    println!("  vidgrab web server starting...");
    println!();
    if let Some(ref dir) = server.static_dir {
        println!("  Serving UI from: {}", dir.display());
    }
    println!("  Local:   http://localhost:{}", server.port);
    println!("  API:     http://localhost:{}/api", server.port);
    println!();

    start_server(server).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidgrab_axum::CorsConfig;
    use vidgrab_runtime::ToolConfig;

    fn cli_config() -> CliConfig {
        CliConfig {
            tool: ToolConfig::default().with_program("/opt/yt-dlp"),
            scratch_dir: PathBuf::from("/var/tmp/vidgrab"),
        }
    }

    #[test]
    fn blank_origins_mean_allow_all() {
        let server = server_config(
            &cli_config(),
            ServeOptions {
                host: "127.0.0.1".into(),
                port: 8123,
                static_dir: None,
                allowed_origins: vec![" ".into()],
            },
        );
        assert_eq!(server.cors, CorsConfig::AllowAll);
        assert_eq!(server.port, 8123);
        assert_eq!(server.scratch_dir, PathBuf::from("/var/tmp/vidgrab"));
        assert_eq!(server.tool.program, "/opt/yt-dlp");
    }

    #[test]
    fn static_dir_and_origins_are_passed_through() {
        let server = server_config(
            &cli_config(),
            ServeOptions {
                host: "0.0.0.0".into(),
                port: 8000,
                static_dir: Some(PathBuf::from("./web/dist")),
                allowed_origins: vec!["http://localhost:5173".into()],
            },
        );
        assert_eq!(server.static_dir, Some(PathBuf::from("./web/dist")));
        assert_eq!(
            server.cors,
            CorsConfig::AllowOrigins(vec!["http://localhost:5173".to_string()])
        );
    }
}
