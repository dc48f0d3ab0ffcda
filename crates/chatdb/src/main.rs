// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat durable-store daemon (chatdbd)
//!
//! Background process that materializes a channel's event log into the
//! durable store and serves recent-history queries over TCP.

use chat_broker::MemoryBroker;
use chat_core::ChannelId;
use chat_db::{run, Config};
use chat_store::MemoryStore;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chatdbd", about = "Chat durable-store daemon", version)]
struct Args {
    /// Log broker address
    #[arg(long, default_value = chat_db::DEFAULT_BROKER_ADDR)]
    broker_addr: String,

    /// Durable store address
    #[arg(long, default_value = chat_db::DEFAULT_STORE_ADDR)]
    store_addr: String,

    /// TCP address to listen on
    #[arg(long, default_value = chat_db::DEFAULT_LISTEN_ADDR)]
    listen_addr: String,

    /// Default rows per history page
    #[arg(long, default_value_t = chat_db::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Channel to materialize
    #[arg(long, default_value_t = chat_db::DEFAULT_CHANNEL)]
    channel: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_logging();

    let config = Config {
        broker_addr: args.broker_addr,
        store_addr: args.store_addr,
        listen_addr: args.listen_addr,
        page_size: args.page_size,
        channel: ChannelId(args.channel),
    };
    config.validate()?;

    info!(
        broker = %config.broker_addr,
        store = %config.store_addr,
        channel = %config.channel,
        "starting chatdbd"
    );

    let broker = MemoryBroker::new();
    let store = MemoryStore::new();

    run(config, broker, store).await?;

    info!("Daemon stopped");
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
