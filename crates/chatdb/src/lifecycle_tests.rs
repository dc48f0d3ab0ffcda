// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chat_broker::{MemoryBroker, Publisher, PublisherConfig};
use chat_core::LogPosition;
use chat_store::{MaterializedMessage, MemoryStore};
use chrono::Utc;
use std::time::Duration;

#[tokio::test]
async fn fresh_store_resumes_live_only() {
    let store = MemoryStore::new();
    let resume = resume_point(&store, ChannelId(211)).await.unwrap();
    assert_eq!(resume, ResumeFrom::LiveOnly);
}

#[tokio::test]
async fn populated_store_resumes_after_its_highest_offset() {
    let store = MemoryStore::new();
    let channel = ChannelId(211);
    let mut session = store.connect().await.unwrap();
    for offset in [3, 7, 5] {
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
    drop(session);

    let resume = resume_point(&store, channel).await.unwrap();
    assert_eq!(resume, ResumeFrom::After(LogPosition(7)));
}

#[tokio::test]
async fn resume_point_is_per_channel() {
    let store = MemoryStore::new();
    let mut session = store.connect().await.unwrap();
    session
        .insert_message(&MaterializedMessage {
            channel_id: ChannelId(1),
            user_id: 1,
            offset: LogPosition(9),
            time_posted: Utc::now(),
            content: "elsewhere".to_string(),
        })
        .await
        .unwrap();
    drop(session);

    let resume = resume_point(&store, ChannelId(2)).await.unwrap();
    assert_eq!(resume, ResumeFrom::LiveOnly);
}

#[tokio::test]
async fn undecodable_event_stops_the_daemon() {
    let broker = MemoryBroker::new();
    let store = MemoryStore::new();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        ..Config::default()
    };
    let channel = config.channel;

    let daemon = tokio::spawn(run(config, broker.clone(), store));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let publisher = broker
        .open_publisher(PublisherConfig::default())
        .await
        .unwrap();
    publisher
        .publish(&channel.topic(), b"not an event".to_vec())
        .await
        .unwrap();

    let err = daemon.await.unwrap().unwrap_err();
    assert!(matches!(err, DaemonError::Materializer(_)));
}

#[tokio::test]
async fn materializer_catches_up_from_live_resume() {
    let broker = MemoryBroker::new();
    let store = MemoryStore::new();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        ..Config::default()
    };
    let channel = config.channel;

    let daemon = tokio::spawn(run(config, broker.clone(), store.clone()));
    tokio::time::sleep(Duration::from_millis(20)).await;

    chat_broker::publish_event(
        &broker,
        channel,
        &chat_core::Event::NewChatMessage(chat_core::NewChatMessage {
            channel_id: channel,
            user_id: 7,
            content: "live".to_string(),
        }),
    )
    .await
    .unwrap();

    // Poll until the materializer lands the row
    for _ in 0..50 {
        if store.row_count() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(store.row_count(), 1);
    assert_eq!(store.rows(channel)[0].content, "live");

    daemon.abort();
}
