// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialization of log events into the durable store

use async_trait::async_trait;
use chat_consumer::{BoxError, Control, EventHandler};
use chat_core::{Event, EventVisitor, Metadata, NewChatMessage};
use chat_store::{gateway, MaterializedMessage, StoreConnector, StoreError, StoreSession};
use tracing::info;

/// Writes each chat event into the messages table.
///
/// The row is keyed by `(channel, offset)`, so a redelivered event lands
/// on the same row it produced the first time. Replays after a crash are
/// therefore safe without any dedup bookkeeping.
pub struct MaterializeVisitor<C: StoreConnector> {
    store: C,
}

impl<C: StoreConnector> MaterializeVisitor<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<C: StoreConnector> EventVisitor for MaterializeVisitor<C> {
    type Error = StoreError;

    async fn visit_new_chat_message(
        &mut self,
        event: &NewChatMessage,
        meta: &Metadata,
    ) -> Result<(), StoreError> {
        let row = MaterializedMessage {
            channel_id: event.channel_id,
            user_id: event.user_id,
            offset: meta.offset,
            time_posted: meta.time_posted,
            content: event.content.clone(),
        };
        gateway::call(&self.store, move |mut session| async move {
            session.insert_message(&row).await
        })
        .await
    }
}

/// Consumption handler that dispatches every event to the materializer.
///
/// A store failure halts consumption: continuing past a write that did
/// not land would leave a hole in the materialized history.
pub struct MaterializeHandler<C: StoreConnector> {
    visitor: MaterializeVisitor<C>,
}

impl<C: StoreConnector> MaterializeHandler<C> {
    pub fn new(store: C) -> Self {
        Self {
            visitor: MaterializeVisitor::new(store),
        }
    }
}

#[async_trait]
impl<C: StoreConnector> EventHandler for MaterializeHandler<C> {
    async fn on_event(&mut self, event: Event, meta: Metadata) -> Result<Control, BoxError> {
        event.dispatch(&meta, &mut self.visitor).await?;
        info!(offset = %meta.offset, "materialized event");
        Ok(Control::Continue)
    }
}

#[cfg(test)]
#[path = "materialize_tests.rs"]
mod tests;
