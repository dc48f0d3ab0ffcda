// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Chat durable-store daemon (chatdbd).
//!
//! Materializes the chat event log into the durable store and answers
//! recent-history queries over a length-prefixed TCP protocol.

mod config;
mod lifecycle;
mod materialize;
pub mod protocol;
mod query;
mod server;

pub use config::{
    Config, ConfigError, DEFAULT_BROKER_ADDR, DEFAULT_CHANNEL, DEFAULT_LISTEN_ADDR,
    DEFAULT_PAGE_SIZE, DEFAULT_STORE_ADDR,
};
pub use lifecycle::{resume_point, run, DaemonError};
pub use materialize::{MaterializeHandler, MaterializeVisitor};
pub use protocol::{MessageFrame, ProtocolError, Request, Response};
pub use query::read_most_recent;
pub use server::{handle_connection, ServerError, ServerState};
