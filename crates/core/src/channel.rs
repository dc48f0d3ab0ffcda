// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel identifiers and topic mapping

use serde::{Deserialize, Serialize};

/// Every channel's stream lives in partition 0 of its own topic
pub const CHANNEL_PARTITION: u32 = 0;

/// Identifier for one logical chat channel.
///
/// No explicit channel entity exists beyond this integer; each channel
/// maps to one single-partition topic on the log broker, which is what
/// gives its messages a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub i64);

impl ChannelId {
    /// Broker topic carrying this channel's stream
    pub fn topic(&self) -> String {
        format!("chat.messages.{}", self.0)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
