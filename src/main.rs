//! Command-line entry point for the port reservation daemon.

use std::path::PathBuf;

use clap::Parser;

use portsquat::config;
use portsquat::lifecycle;
use portsquat::observability::logging;

/// Hold TCP ports open and discard every connection made to them.
#[derive(Parser, Debug)]
#[command(
    name = "portsquat",
    version,
    about = "Reserves TCP ports by holding listening sockets and discarding all connections."
)]
struct Cli {
    /// Port specification, e.g. "8080,9000-9005".
    #[arg(short = 'p', long = "ports", value_name = "SPEC")]
    ports: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Log level (debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    level: Option<String>,

    /// Optional TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.debug, cli.level.as_deref());

    let file = match cli.config.as_deref() {
        Some(path) => match config::load_file(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::error!(error = %err, "Failed to load configuration");
                std::process::exit(1);
            }
        },
        None => config::FileConfig::default(),
    };
    let config = config::merge(cli.ports, file);

    tracing::info!(
        version = config.build.version,
        commit = config.build.commit,
        pid = std::process::id(),
        "portsquat started"
    );

    if let Err(err) = lifecycle::run(config).await {
        tracing::error!(error = %err, "Fatal startup error");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
