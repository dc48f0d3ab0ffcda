// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Continuous offset-tracked consumption

use async_trait::async_trait;
use chat_broker::{BrokerConnector, BrokerError, SubscribeFrom, Subscriber, SubscriberConfig, Subscription};
use chat_core::{ChannelId, DecodeError, Event, LogPosition, Metadata, CHANNEL_PARTITION};
use thiserror::Error;
use tracing::{debug, warn};

use crate::BoxError;

/// Where continuous consumption resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFrom {
    /// The earliest retained offset
    Beginning,
    /// Only events published after the watch starts
    LiveOnly,
    /// Strictly after this offset: the caller has already processed
    /// everything at and before it, typically via
    /// [`read_until_offset`](crate::read_until_offset). This is the seam
    /// between catch-up replay and live consumption.
    After(LogPosition),
}

/// Loop policy returned by an [`EventHandler`] method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Halt,
}

/// Per-event policy supplied by the caller of [`watch_channel`].
///
/// The loop itself never inspects event variants; it decodes, builds
/// metadata, and defers every decision to the handler. Whether an error
/// stops consumption is the handler's call, not the loop's.
#[async_trait]
pub trait EventHandler: Send {
    /// Handle one decoded event.
    ///
    /// `Err` halts the loop and surfaces as [`WatchError::Dispatch`];
    /// `Ok(Control::Halt)` stops the loop cleanly.
    async fn on_event(&mut self, event: Event, meta: Metadata) -> Result<Control, BoxError>;

    /// Policy for a payload that failed to decode.
    ///
    /// The default halts: corrupt data is never accepted silently. A
    /// handler returning `Continue` quarantines the offending offset and
    /// lets consumption proceed.
    async fn on_decode_error(&mut self, _offset: LogPosition, _error: &DecodeError) -> Control {
        Control::Halt
    }
}

/// Errors from continuous consumption
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
    #[error("undecodable event at offset {offset}: {source}")]
    Decode {
        offset: LogPosition,
        #[source]
        source: DecodeError,
    },
    #[error("dispatch failed at offset {offset}: {source}")]
    Dispatch {
        offset: LogPosition,
        #[source]
        source: BoxError,
    },
}

/// Consume `channel` continuously, decoding each message and handing it
/// to `handler` in strict offset order, one at a time.
///
/// The loop blocks while waiting for new messages; it ends with `Ok(())`
/// when the subscription is closed or the handler asks to halt, and with
/// an error when the broker fails, a payload is undecodable under the
/// handler's policy, or a dispatch fails.
pub async fn watch_channel<C, H>(
    connector: &C,
    channel: ChannelId,
    resume: ResumeFrom,
    handler: &mut H,
) -> Result<(), WatchError>
where
    C: BrokerConnector,
    H: EventHandler,
{
    let from = match resume {
        ResumeFrom::Beginning => SubscribeFrom::Earliest,
        ResumeFrom::LiveOnly => SubscribeFrom::Latest,
        ResumeFrom::After(offset) => SubscribeFrom::Offset(offset.next()),
    };

    let subscriber = connector
        .open_subscriber(SubscriberConfig::default())
        .await?;
    let mut subscription = subscriber
        .subscribe(&channel.topic(), CHANNEL_PARTITION, from)
        .await?;

    debug!(channel = %channel, ?resume, "watching channel");

    while let Some(message) = subscription.recv().await? {
        let event = match Event::decode(&message.value) {
            Ok(event) => event,
            Err(error) => match handler.on_decode_error(message.offset, &error).await {
                Control::Continue => {
                    warn!(channel = %channel, offset = %message.offset, %error, "skipping undecodable event");
                    continue;
                }
                Control::Halt => {
                    return Err(WatchError::Decode {
                        offset: message.offset,
                        source: error,
                    });
                }
            },
        };

        let meta = Metadata {
            offset: message.offset,
            time_posted: message.timestamp,
        };

        match handler.on_event(event, meta).await {
            Ok(Control::Continue) => {}
            Ok(Control::Halt) => {
                debug!(channel = %channel, offset = %message.offset, "handler requested halt");
                return Ok(());
            }
            Err(source) => {
                return Err(WatchError::Dispatch {
                    offset: message.offset,
                    source,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
