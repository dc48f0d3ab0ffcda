// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded catch-up replay

use chat_broker::{BrokerConnector, BrokerError, SubscribeFrom, Subscriber, SubscriberConfig, Subscription};
use chat_core::{ChannelId, LogPosition, CHANNEL_PARTITION};
use thiserror::Error;
use tracing::debug;

use crate::BoxError;

/// Errors from bounded replay
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
    #[error("replay callback failed at offset {offset}: {source}")]
    Callback {
        offset: LogPosition,
        #[source]
        source: BoxError,
    },
}

/// Consume `channel`'s partition from the earliest retained offset up to
/// and including `target`, feeding each payload to `on_message`, then
/// stop.
///
/// Termination requires observing one message past the target: if the
/// partition is empty, or nothing beyond `target` has been published
/// yet, this blocks until such a message arrives or the subscription is
/// closed. Callers needing a non-blocking "already caught up" check must
/// pass a target they know lies below the partition's current end. The
/// liveness wait is deliberate; no timeout is applied here.
///
/// A callback error stops the replay and is surfaced as
/// [`ReplayError::Callback`].
pub async fn read_until_offset<C, F>(
    connector: &C,
    channel: ChannelId,
    target: LogPosition,
    mut on_message: F,
) -> Result<(), ReplayError>
where
    C: BrokerConnector,
    F: FnMut(&[u8]) -> Result<(), BoxError> + Send,
{
    let subscriber = connector
        .open_subscriber(SubscriberConfig::default())
        .await?;
    let mut subscription = subscriber
        .subscribe(&channel.topic(), CHANNEL_PARTITION, SubscribeFrom::Earliest)
        .await?;

    debug!(channel = %channel, target = %target, "replaying up to target offset");

    while let Some(message) = subscription.recv().await? {
        // The first message past the target means the target itself, and
        // everything before it, has been delivered
        if message.offset > target {
            return Ok(());
        }
        on_message(&message.value).map_err(|source| ReplayError::Callback {
            offset: message.offset,
            source,
        })?;
    }

    // Subscription closed underneath us before passing the target
    Ok(())
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
