// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trait definitions for the log broker boundary

use crate::config::{PublisherConfig, SubscriberConfig};
use async_trait::async_trait;
use chat_core::LogPosition;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A message as delivered by the log broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub offset: LogPosition,
    pub value: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

/// Starting position for a new subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeFrom {
    /// The earliest retained offset of the partition
    Earliest,
    /// Only messages published after the subscription opens
    Latest,
    /// A specific offset, inclusive
    Offset(LogPosition),
}

/// Errors from the log broker boundary.
///
/// Connection failures are returned to the caller, never retried here;
/// retry policy belongs to whoever opened the connection.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker unreachable: {0}")]
    Connection(String),
    #[error("invalid broker config: {0}")]
    Config(String),
    #[error("publish failed: {0}")]
    Publish(String),
    #[error("subscription closed")]
    Closed,
}

/// Publishes messages to the append-only log.
///
/// One blocking request/response per message; the broker assigns the
/// partition and offset.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, value: Vec<u8>)
        -> Result<(u32, LogPosition), BrokerError>;
}

/// An open ordered feed over one partition. Infinite, and not
/// restartable once closed.
#[async_trait]
pub trait Subscription: Send {
    /// Wait for the next message in offset order.
    ///
    /// Returns `Ok(None)` exactly when the subscription has been closed;
    /// blocks otherwise. Consumer-side errors are surfaced here, never
    /// dropped.
    async fn recv(&mut self) -> Result<Option<LogMessage>, BrokerError>;
}

/// Consumes partitions from the log broker
#[async_trait]
pub trait Subscriber: Send + Sync {
    type Subscription: Subscription;

    async fn subscribe(
        &self,
        topic: &str,
        partition: u32,
        from: SubscribeFrom,
    ) -> Result<Self::Subscription, BrokerError>;
}

/// Opens connections to the log broker (the connection factory).
///
/// Pure resource construction: no state beyond the broker addresses the
/// implementation was built with. Cloning yields another handle to the
/// same broker.
#[async_trait]
pub trait BrokerConnector: Clone + Send + Sync + 'static {
    type Publisher: Publisher;
    type Subscriber: Subscriber;

    async fn open_publisher(&self, config: PublisherConfig)
        -> Result<Self::Publisher, BrokerError>;

    async fn open_subscriber(&self, config: SubscriberConfig)
        -> Result<Self::Subscriber, BrokerError>;
}
