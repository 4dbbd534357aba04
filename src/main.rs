use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use url::Url;

use site_router::config::{load_config, validate_config, RouterConfig, StoreConfig};
use site_router::observability::{logging, metrics};
use site_router::{store, HttpServer, Shutdown};

/// Serve a multilingual static site with locale and SPA fallbacks.
#[derive(Parser, Debug)]
#[command(name = "site-router", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Serve assets from this directory.
    #[arg(long, conflicts_with = "origin")]
    root: Option<PathBuf>,

    /// Serve assets from this upstream HTTP origin.
    #[arg(long)]
    origin: Option<Url>,
}

impl Cli {
    fn apply(self, config: &mut RouterConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(root) = self.root {
            config.store = StoreConfig::Directory { root };
        }
        if let Some(url) = self.origin {
            config.store = StoreConfig::Origin { url };
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(|errors| {
        errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })?;

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "site-router starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let store = store::from_config(
        &config.store,
        std::time::Duration::from_secs(config.timeouts.connect_secs),
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
