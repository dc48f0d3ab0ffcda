// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trait definitions for the durable store boundary

use crate::model::MaterializedMessage;
use async_trait::async_trait;
use chat_core::{ChannelId, LogPosition};
use thiserror::Error;

/// Errors from the durable store boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Connection(String),
    #[error("query failed: {0}")]
    Query(String),
}

/// One scoped session against the durable store.
///
/// Sessions live for exactly one unit of work (see [`gateway::call`])
/// and are released on drop; no component holds one across multiple
/// logical operations.
///
/// [`gateway::call`]: crate::gateway::call
#[async_trait]
pub trait StoreSession: Send {
    /// Keyed insert: retried or duplicate delivery of the same
    /// `(channel, offset)` overwrites rather than duplicates.
    async fn insert_message(&mut self, row: &MaterializedMessage) -> Result<(), StoreError>;

    /// Up to `limit` rows for the channel, in descending offset order.
    /// A zero limit yields an empty result without error.
    async fn most_recent(
        &mut self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<MaterializedMessage>, StoreError>;

    /// Highest stored offset for the channel, `None` when nothing is
    /// stored. A single-replica (eventual) read is acceptable here.
    async fn max_offset(&mut self, channel: ChannelId)
        -> Result<Option<LogPosition>, StoreError>;
}

/// Opens sessions against the durable store. Cloning yields another
/// handle to the same store.
#[async_trait]
pub trait StoreConnector: Clone + Send + Sync + 'static {
    type Session: StoreSession;

    async fn connect(&self) -> Result<Self::Session, StoreError>;
}
