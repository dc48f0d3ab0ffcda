// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat events, the wire codec, and the visitor dispatch contract
//!
//! This module provides:
//! - `Event` - Tagged union of chat-domain occurrences
//! - `EventVisitor` - Polymorphic per-variant handler (double dispatch)
//! - `Metadata` - Per-message envelope produced at decode time

use crate::channel::ChannelId;
use crate::position::LogPosition;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A new chat message posted to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub channel_id: ChannelId,
    pub user_id: i64,
    pub content: String,
}

/// Chat-domain occurrences carried on the event log.
///
/// Events are immutable once constructed and have purely structural
/// identity; uniqueness and ordering come from the log offset, never
/// from the event itself. The wire envelope is self-describing: the
/// `kind` tag selects the variant and `payload` carries its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Event {
    NewChatMessage(NewChatMessage),
}

/// Per-message envelope carried alongside a decoded event.
///
/// Produced by the consumer at decode time from the broker's message
/// envelope; never persisted independently of the event it accompanies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub offset: LogPosition,
    pub time_posted: DateTime<Utc>,
}

/// Raw log bytes did not decode into a known event
#[derive(Debug, Error)]
#[error("malformed event payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// An event could not be serialized into its envelope
#[derive(Debug, Error)]
#[error("failed to encode event: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Polymorphic handler over the open set of event variants.
///
/// Adding an event kind means adding one enum variant, one `dispatch`
/// arm, and one visitor method; no consumption loop changes. The
/// exhaustive match in `dispatch` turns a forgotten method into a
/// compile error.
#[async_trait]
pub trait EventVisitor {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn visit_new_chat_message(
        &mut self,
        event: &NewChatMessage,
        meta: &Metadata,
    ) -> Result<(), Self::Error>;
}

impl Event {
    /// Serialize into the self-describing wire envelope
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode from the wire envelope.
    ///
    /// Unknown tags and malformed payloads fail with a [`DecodeError`];
    /// they never terminate the process.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Invoke the visitor method matching this variant
    pub async fn dispatch<V>(&self, meta: &Metadata, visitor: &mut V) -> Result<(), V::Error>
    where
        V: EventVisitor + Send,
    {
        match self {
            Event::NewChatMessage(event) => visitor.visit_new_chat_message(event, meta).await,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
