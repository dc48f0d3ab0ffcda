// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: bootstrap, main loop, shutdown.

use chat_broker::BrokerConnector;
use chat_consumer::{watch_channel, ResumeFrom, WatchError};
use chat_core::ChannelId;
use chat_store::{gateway, StoreConnector, StoreError, StoreSession};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::materialize::MaterializeHandler;
use crate::server::{self, ServerState};

/// Daemon errors
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("materializer failed: {0}")]
    Materializer(#[from] WatchError),
}

/// Where the materializer should resume on the channel's log.
///
/// The highest materialized offset doubles as the consumption cursor:
/// everything at or below it is already in the store, so consumption
/// restarts strictly after it. An empty table means a fresh deployment
/// and live-only consumption.
pub async fn resume_point<S: StoreConnector>(
    store: &S,
    channel: ChannelId,
) -> Result<ResumeFrom, StoreError> {
    let max = gateway::call(store, move |mut session| async move {
        session.max_offset(channel).await
    })
    .await?;

    Ok(match max {
        Some(offset) => ResumeFrom::After(offset),
        None => ResumeFrom::LiveOnly,
    })
}

/// Run the daemon until a shutdown signal or a fatal materializer error.
///
/// One task consumes the channel's log into the store; the main loop
/// serves query connections. A materializer failure is fatal: serving
/// reads from a store that silently stopped advancing would hand out
/// stale history as if it were current.
pub async fn run<B, S>(config: Config, broker: B, store: S) -> Result<(), DaemonError>
where
    B: BrokerConnector,
    S: StoreConnector,
{
    let listener = TcpListener::bind(&config.listen_addr).await?;

    let resume = resume_point(&store, config.channel).await?;
    info!(channel = %config.channel, ?resume, "starting materializer");

    let (consumer_tx, mut consumer_rx) = mpsc::channel(1);
    let consumer_broker = broker.clone();
    let consumer_store = store.clone();
    let channel = config.channel;
    tokio::spawn(async move {
        let mut handler = MaterializeHandler::new(consumer_store);
        let result = watch_channel(&consumer_broker, channel, resume, &mut handler).await;
        let _ = consumer_tx.send(result).await;
    });

    let state = ServerState {
        broker,
        store,
        page_size: config.page_size,
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!(addr = %config.listen_addr, "daemon ready");

    loop {
        tokio::select! {
            // Accept client connections
            result = listener.accept() => {
                match result {
                    Ok((stream, peer)) => {
                        debug!(%peer, "accepted connection");
                        if let Err(e) = server::handle_connection(&state, stream).await {
                            error!("Error handling connection: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("Error accepting connection: {}", e);
                    }
                }
            }

            // The materializer task ended
            Some(result) = consumer_rx.recv() => {
                return match result {
                    Ok(()) => {
                        info!("materializer stopped");
                        Ok(())
                    }
                    Err(e) => {
                        error!("materializer failed: {}", e);
                        Err(DaemonError::Materializer(e))
                    }
                };
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                return Ok(());
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
