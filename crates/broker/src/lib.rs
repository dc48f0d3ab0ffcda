// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Log broker boundary: connection factory traits, publisher and
//! subscriber configuration, and the in-process broker.
//!
//! Real broker bindings attach at the [`BrokerConnector`] seam; the rest
//! of the system only ever sees these traits.

mod config;
mod memory;
mod publish;
mod traits;

pub use config::{PublisherConfig, RequiredAcks, SubscriberConfig};
pub use memory::{MemoryBroker, MemoryPublisher, MemorySubscriber, MemorySubscription, SubscriptionHandle};
pub use publish::{publish_event, PublishError};
pub use traits::{
    BrokerConnector, BrokerError, LogMessage, Publisher, SubscribeFrom, Subscriber, Subscription,
};
