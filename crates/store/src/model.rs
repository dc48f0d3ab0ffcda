// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The materialized row model

use chat_core::{ChannelId, LogPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One durable row of the messages table, keyed by `(channel_id, offset)`.
///
/// Created exactly once per successfully dispatched event and never
/// updated. The offset is the join key back to the log: re-inserting the
/// same key targets the same logical row, which is what makes replay
/// idempotent by overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedMessage {
    pub channel_id: ChannelId,
    pub user_id: i64,
    pub offset: LogPosition,
    pub time_posted: DateTime<Utc>,
    pub content: String,
}
