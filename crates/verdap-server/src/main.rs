//! verdap - a deliberately vulnerable LDAP-style directory lab
//!
//! An in-memory directory server with a small HTML front end for practicing
//! LDAP injection. Never expose it to a network you care about.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use verdap_core::config::VerdapConfig;
use verdap_server::WebServer;

#[derive(Parser)]
#[command(name = "verdap")]
#[command(version = verdap_core::VERSION)]
#[command(about = "Deliberately vulnerable LDAP directory lab", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address
    #[arg(long, env = "VERDAP_BIND_ADDRESS")]
    bind: Option<String>,

    /// Port number
    #[arg(short, long, env = "VERDAP_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "VERDAP_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        VerdapConfig::from_file(config_path)?
    } else {
        VerdapConfig::from_env()
    };

    if let Some(bind) = cli.bind {
        config.web.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    config.validate();
    if config.debug {
        config.dump();
    }

    info!("starting verdap {}", verdap_core::VERSION);
    info!(
        "serving {} groups, {} users, {} fruits, {} vegetables",
        config.groups.len(),
        config.users.len(),
        config.fruits.len(),
        config.vegetables.len()
    );

    WebServer::new(config).run().await?;

    Ok(())
}
