// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Chat domain types: events, the wire codec, visitor dispatch, log
//! positions, and channel identifiers.

mod channel;
mod event;
mod position;

pub use channel::{ChannelId, CHANNEL_PARTITION};
pub use event::{DecodeError, EncodeError, Event, EventVisitor, Metadata, NewChatMessage};
pub use position::LogPosition;
