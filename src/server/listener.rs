use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, Limits};
use crate::router::Dispatcher;
use crate::storage::{DiskStorage, FileStorage};

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn run(cfg: &Config, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr()))?;
    info!("Listening on {}", cfg.listen_addr());
    info!(directory = %cfg.directory.display(), "Serving files");

    let dispatcher = Arc::new(Dispatcher::new(DiskStorage::new(&cfg.directory)));
    serve(listener, dispatcher, cfg.limits(), cfg.shutdown_grace(), shutdown).await
}

/// Accepts connections on `listener`, one task each, until `shutdown` resolves.
///
/// In-flight connections then get `grace` to finish before being aborted.
pub async fn serve<S: FileStorage>(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher<S>>,
    limits: Limits,
    grace: Duration,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let mut connections = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };
                info!("Accepted connection from {}", peer);

                let dispatcher = Arc::clone(&dispatcher);
                connections.spawn(async move {
                    let mut conn = Connection::new(socket, dispatcher, limits);
                    if let Err(e) = conn.run().await {
                        tracing::error!("Connection error from {}: {}", peer, e);
                    }
                });
            }

            Some(finished) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "Connection task failed");
                }
            }

            _ = &mut shutdown => {
                info!(in_flight = connections.len(), "Shutting down, no longer accepting");
                break;
            }
        }
    }

    drain(connections, grace).await;
    Ok(())
}

async fn drain(mut connections: JoinSet<()>, grace: Duration) {
    let finished = tokio::time::timeout(grace, async {
        while connections.join_next().await.is_some() {}
    })
    .await;

    if finished.is_err() {
        tracing::warn!(
            remaining = connections.len(),
            "Grace period elapsed, aborting connections"
        );
        connections.shutdown().await;
    }
}
