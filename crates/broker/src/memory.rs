// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process log broker for tests and single-node runs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chat_core::LogPosition;
use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::config::{PublisherConfig, SubscriberConfig};
use crate::traits::{
    BrokerConnector, BrokerError, LogMessage, Publisher, SubscribeFrom, Subscriber, Subscription,
};
use async_trait::async_trait;

/// In-process append-only log broker.
///
/// Each (topic, partition) pair is an ordered log with a strictly
/// increasing offset counter. Subscriptions replay retained messages
/// first, then follow the live tail. Cloning yields another handle to
/// the same broker; dropping the last handle tears down every open
/// subscription.
#[derive(Clone, Default)]
pub struct MemoryBroker {
    partitions: Arc<Mutex<HashMap<(String, u32), Partition>>>,
}

#[derive(Debug, Default)]
struct Partition {
    next_offset: i64,
    records: Vec<LogMessage>,
    tails: Vec<mpsc::UnboundedSender<LogMessage>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an empty partition's offset counter at `base`, simulating a
    /// partition whose earlier segments were retired. No effect once the
    /// partition holds records.
    pub fn set_base_offset(&self, topic: &str, partition: u32, base: LogPosition) {
        let mut partitions = self.partitions.lock().unwrap_or_else(|e| e.into_inner());
        let part = partitions
            .entry((topic.to_string(), partition))
            .or_default();
        if part.records.is_empty() {
            part.next_offset = base.0;
        }
    }

    /// Offset the next published message will receive, if the partition
    /// exists
    pub fn end_offset(&self, topic: &str, partition: u32) -> Option<LogPosition> {
        let partitions = self.partitions.lock().unwrap_or_else(|e| e.into_inner());
        partitions
            .get(&(topic.to_string(), partition))
            .map(|p| LogPosition(p.next_offset))
    }
}

#[async_trait]
impl BrokerConnector for MemoryBroker {
    type Publisher = MemoryPublisher;
    type Subscriber = MemorySubscriber;

    async fn open_publisher(&self, config: PublisherConfig) -> Result<MemoryPublisher, BrokerError> {
        config.validate()?;
        Ok(MemoryPublisher {
            partitions: Arc::clone(&self.partitions),
        })
    }

    async fn open_subscriber(
        &self,
        _config: SubscriberConfig,
    ) -> Result<MemorySubscriber, BrokerError> {
        Ok(MemorySubscriber {
            partitions: Arc::clone(&self.partitions),
        })
    }
}

/// Publisher handle onto a [`MemoryBroker`]
#[derive(Debug)]
pub struct MemoryPublisher {
    partitions: Arc<Mutex<HashMap<(String, u32), Partition>>>,
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(
        &self,
        topic: &str,
        value: Vec<u8>,
    ) -> Result<(u32, LogPosition), BrokerError> {
        let partition = 0;
        let mut partitions = self.partitions.lock().unwrap_or_else(|e| e.into_inner());
        let part = partitions
            .entry((topic.to_string(), partition))
            .or_default();

        let offset = LogPosition(part.next_offset);
        part.next_offset += 1;

        let message = LogMessage {
            offset,
            value,
            timestamp: Utc::now(),
        };
        part.records.push(message.clone());
        // Drop tails whose subscription has gone away
        part.tails.retain(|tx| tx.send(message.clone()).is_ok());

        debug!(topic, partition, offset = %offset, "message stored");
        Ok((partition, offset))
    }
}

/// Subscriber handle onto a [`MemoryBroker`]
pub struct MemorySubscriber {
    partitions: Arc<Mutex<HashMap<(String, u32), Partition>>>,
}

#[async_trait]
impl Subscriber for MemorySubscriber {
    type Subscription = MemorySubscription;

    async fn subscribe(
        &self,
        topic: &str,
        partition: u32,
        from: SubscribeFrom,
    ) -> Result<MemorySubscription, BrokerError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (close_tx, close_rx) = watch::channel(false);

        let mut partitions = self.partitions.lock().unwrap_or_else(|e| e.into_inner());
        let part = partitions
            .entry((topic.to_string(), partition))
            .or_default();

        for record in &part.records {
            let retained = match from {
                SubscribeFrom::Earliest => true,
                SubscribeFrom::Latest => false,
                SubscribeFrom::Offset(start) => record.offset >= start,
            };
            if retained {
                // Receiver is still in scope, the send cannot fail
                let _ = tx.send(record.clone());
            }
        }
        part.tails.push(tx);

        Ok(MemorySubscription {
            rx,
            closed: close_rx,
            handle: SubscriptionHandle {
                close: Arc::new(close_tx),
            },
        })
    }
}

/// Handle for closing a subscription from another task.
///
/// Closing unblocks a pending `recv`, which then reports end of stream.
#[derive(Clone)]
pub struct SubscriptionHandle {
    close: Arc<watch::Sender<bool>>,
}

impl SubscriptionHandle {
    pub fn close(&self) {
        let _ = self.close.send(true);
    }
}

/// One open feed over a [`MemoryBroker`] partition
pub struct MemorySubscription {
    rx: mpsc::UnboundedReceiver<LogMessage>,
    closed: watch::Receiver<bool>,
    handle: SubscriptionHandle,
}

impl MemorySubscription {
    /// Handle for tearing this subscription down
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }
}

#[async_trait]
impl Subscription for MemorySubscription {
    async fn recv(&mut self) -> Result<Option<LogMessage>, BrokerError> {
        if *self.closed.borrow() {
            return Ok(None);
        }
        tokio::select! {
            message = self.rx.recv() => Ok(message),
            _ = self.closed.changed() => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
