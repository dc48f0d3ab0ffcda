// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Offset-tracked consumption of the chat event log.
//!
//! This crate provides:
//! - `read_until_offset` - Bounded catch-up replay to a known offset
//! - `watch_channel` - Continuous decode-and-dispatch consumption
//! - `EventHandler` - Caller-supplied per-event policy

mod replay;
mod watch;

/// Error type carried by caller-supplied callbacks and handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub use replay::{read_until_offset, ReplayError};
pub use watch::{watch_channel, Control, EventHandler, ResumeFrom, WatchError};
