// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chat_core::LogPosition;
use chat_store::MemoryStore;
use chrono::Utc;

async fn seed(store: &MemoryStore, channel: ChannelId, offsets: &[i64]) {
    let mut session = store.connect().await.unwrap();
    for &offset in offsets {
        session
            .insert_message(&MaterializedMessage {
                channel_id: channel,
                user_id: 1,
                offset: LogPosition(offset),
                time_posted: Utc::now(),
                content: format!("m{offset}"),
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn page_is_newest_rows_in_chronological_order() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    seed(&store, channel, &[1, 2, 3, 4, 5]).await;

    let rows = read_most_recent(&store, channel, 3).await.unwrap();

    let offsets: Vec<i64> = rows.iter().map(|r| r.offset.0).collect();
    assert_eq!(offsets, vec![3, 4, 5]);
}

#[tokio::test]
async fn short_history_returns_everything() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    seed(&store, channel, &[0, 1]).await;

    let rows = read_most_recent(&store, channel, 10).await.unwrap();

    let offsets: Vec<i64> = rows.iter().map(|r| r.offset.0).collect();
    assert_eq!(offsets, vec![0, 1]);
}

#[tokio::test]
async fn empty_channel_reads_empty() {
    let store = MemoryStore::new();
    let rows = read_most_recent(&store, ChannelId(404), 3).await.unwrap();
    assert!(rows.is_empty());
}
