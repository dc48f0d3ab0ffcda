// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};

fn row(channel: i64, offset: i64, content: &str) -> MaterializedMessage {
    MaterializedMessage {
        channel_id: ChannelId(channel),
        user_id: 42,
        offset: LogPosition(offset),
        time_posted: Utc.timestamp_opt(1_700_000_000 + offset, 0).single().unwrap(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn insert_then_read_back() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    session.insert_message(&row(7, 1, "first")).await.unwrap();
    let rows = session.most_recent(ChannelId(7), 10).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].content, "first");
}

#[tokio::test]
async fn same_key_overwrites_instead_of_duplicating() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    session.insert_message(&row(7, 5, "original")).await.unwrap();
    session.insert_message(&row(7, 5, "redelivered")).await.unwrap();

    let rows = session.most_recent(ChannelId(7), 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].content, "redelivered");
}

#[tokio::test]
async fn most_recent_returns_descending_offsets() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    for offset in 1..=5 {
        session
            .insert_message(&row(7, offset, &format!("m{offset}")))
            .await
            .unwrap();
    }

    let rows = session.most_recent(ChannelId(7), 3).await.unwrap();
    let offsets: Vec<i64> = rows.iter().map(|r| r.offset.0).collect();
    assert_eq!(offsets, vec![5, 4, 3]);
}

#[tokio::test]
async fn zero_limit_is_empty_without_error() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    session.insert_message(&row(7, 1, "x")).await.unwrap();
    let rows = session.most_recent(ChannelId(7), 0).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn channels_are_isolated() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    session.insert_message(&row(1, 1, "one")).await.unwrap();
    session.insert_message(&row(2, 1, "two")).await.unwrap();

    let rows = session.most_recent(ChannelId(1), 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].content, "one");
}

#[tokio::test]
async fn max_offset_tracks_the_highest_key() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();

    assert_eq!(session.max_offset(ChannelId(7)).await.unwrap(), None);

    session.insert_message(&row(7, 3, "a")).await.unwrap();
    session.insert_message(&row(7, 12, "b")).await.unwrap();
    session.insert_message(&row(8, 99, "other channel")).await.unwrap();

    assert_eq!(
        session.max_offset(ChannelId(7)).await.unwrap(),
        Some(LogPosition(12))
    );
}

#[tokio::test]
async fn injected_insert_failure_surfaces() {
    let store = MemoryStore::new();
    store.fail_inserts(true);
    let mut session = store.connect().await.unwrap();

    let err = session.insert_message(&row(7, 1, "x")).await.unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}
