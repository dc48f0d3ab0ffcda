// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The publish path: encode one event and send it to the log

use chat_core::{ChannelId, EncodeError, Event, LogPosition};
use thiserror::Error;
use tracing::info;

use crate::config::PublisherConfig;
use crate::traits::{BrokerConnector, BrokerError, Publisher};

/// Errors from publishing a single event
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Encode `event` and send it to `channel`'s partition.
///
/// One blocking request/response with the broker: returns the partition
/// and offset the broker assigned.
pub async fn publish_event<C>(
    connector: &C,
    channel: ChannelId,
    event: &Event,
) -> Result<(u32, LogPosition), PublishError>
where
    C: BrokerConnector,
{
    let publisher = connector.open_publisher(PublisherConfig::default()).await?;
    let value = event.encode()?;
    let (partition, offset) = publisher.publish(&channel.topic(), value).await?;
    info!(channel = %channel, partition, offset = %offset, "event published");
    Ok((partition, offset))
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
