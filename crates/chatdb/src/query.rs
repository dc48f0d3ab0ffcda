// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recent-history reads

use chat_core::ChannelId;
use chat_store::{gateway, MaterializedMessage, StoreConnector, StoreError, StoreSession};

/// The most recent `limit` rows of a channel, in chronological order.
///
/// The store scans newest-first; the page is reversed before returning
/// so clients receive oldest-first, the order a chat window renders in.
pub async fn read_most_recent<C: StoreConnector>(
    store: &C,
    channel: ChannelId,
    limit: usize,
) -> Result<Vec<MaterializedMessage>, StoreError> {
    let mut rows = gateway::call(store, move |mut session| async move {
        session.most_recent(channel, limit).await
    })
    .await?;
    rows.reverse();
    Ok(rows)
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
