use std::path::PathBuf;

use clap::Parser;
use courier::config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "courier")]
#[command(about = "Minimal HTTP/1.1 server with echo, user-agent and file routes")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /files/
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Largest request accepted, in bytes
    #[arg(long)]
    max_request_bytes: Option<usize>,

    /// Per-read timeout in milliseconds
    #[arg(long)]
    read_timeout_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let mut cfg = base.merge_env(|key| std::env::var(key).ok())?;

        if let Some(host) = self.host {
            cfg.host = host;
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(directory) = self.directory {
            cfg.directory = directory;
        }
        if let Some(max) = self.max_request_bytes {
            cfg.max_request_bytes = max;
        }
        if let Some(ms) = self.read_timeout_ms {
            cfg.read_timeout_ms = ms;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Cli::parse().into_config()?;

    courier::server::run(&cfg, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    })
    .await
}
