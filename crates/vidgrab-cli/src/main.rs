//! CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use vidgrab_cli::handlers::serve::ServeOptions;
use vidgrab_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
            allowed_origins,
        } => {
            handlers::serve::execute(
                &config,
                ServeOptions {
                    host,
                    port,
                    static_dir,
                    allowed_origins,
                },
            )
            .await
        }
        Commands::Info { url } => handlers::info::execute(&bootstrap(config), &url).await,
        Commands::Download { url, format, out } => {
            handlers::download::execute(&bootstrap(config), &url, format, &out).await
        }
        Commands::CheckTool => handlers::check_tool::execute(&bootstrap(config)).await,
        Commands::Paths => {
            handlers::paths::execute(&bootstrap(config));
            Ok(())
        }
    }
}
