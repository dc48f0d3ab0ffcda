// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chat_core::{ChannelId, LogPosition};
use chat_store::MemoryStore;
use chrono::Utc;

fn event(channel: ChannelId, content: &str) -> Event {
    Event::NewChatMessage(NewChatMessage {
        channel_id: channel,
        user_id: 9,
        content: content.to_string(),
    })
}

fn meta(offset: i64) -> Metadata {
    Metadata {
        offset: LogPosition(offset),
        time_posted: Utc::now(),
    }
}

#[tokio::test]
async fn visitor_writes_one_row_per_event() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    let mut visitor = MaterializeVisitor::new(store.clone());

    event(channel, "hello")
        .dispatch(&meta(5), &mut visitor)
        .await
        .unwrap();

    assert_eq!(store.row_count(), 1);
    let rows = store.rows(channel);
    assert_eq!(rows[0].offset, LogPosition(5));
    assert_eq!(rows[0].user_id, 9);
    assert_eq!(rows[0].content, "hello");
}

#[tokio::test]
async fn redelivery_overwrites_the_same_row() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    let mut handler = MaterializeHandler::new(store.clone());

    let control = handler.on_event(event(channel, "first"), meta(3)).await.unwrap();
    assert_eq!(control, Control::Continue);
    let control = handler.on_event(event(channel, "first"), meta(3)).await.unwrap();
    assert_eq!(control, Control::Continue);

    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn store_failure_surfaces_from_the_handler() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    store.fail_inserts(true);
    let mut handler = MaterializeHandler::new(store.clone());

    let err = handler
        .on_event(event(channel, "doomed"), meta(0))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("injected insert failure"));
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn sessions_are_released_after_each_write() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    let mut visitor = MaterializeVisitor::new(store.clone());

    event(channel, "scoped")
        .dispatch(&meta(1), &mut visitor)
        .await
        .unwrap();

    assert_eq!(store.open_sessions(), 0);
}
