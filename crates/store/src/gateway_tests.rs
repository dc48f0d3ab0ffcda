// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::memory::MemoryStore;
use crate::model::MaterializedMessage;
use crate::traits::StoreSession;
use chat_core::{ChannelId, LogPosition};
use chrono::Utc;

fn row(offset: i64) -> MaterializedMessage {
    MaterializedMessage {
        channel_id: ChannelId(7),
        user_id: 1,
        offset: LogPosition(offset),
        time_posted: Utc::now(),
        content: "hello".to_string(),
    }
}

#[tokio::test]
async fn session_is_released_after_success() {
    let store = MemoryStore::new();

    let count: Result<usize, StoreError> = call(&store, |mut session| async move {
        session.insert_message(&row(1)).await?;
        Ok(session.most_recent(ChannelId(7), 10).await?.len())
    })
    .await;

    assert_eq!(count.unwrap(), 1);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn session_is_released_after_error() {
    let store = MemoryStore::new();
    store.fail_inserts(true);

    let result: Result<(), StoreError> = call(&store, |mut session| async move {
        session.insert_message(&row(1)).await
    })
    .await;

    assert!(result.is_err());
    assert_eq!(store.open_sessions(), 0);
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum CallerError {
    #[error("store: {0}")]
    Store(String),
    #[error("domain rule broken")]
    Domain,
}

impl From<StoreError> for CallerError {
    fn from(err: StoreError) -> Self {
        CallerError::Store(err.to_string())
    }
}

#[tokio::test]
async fn inner_error_propagates_unchanged() {
    let store = MemoryStore::new();

    let result: Result<(), CallerError> =
        call(&store, |_session| async move { Err(CallerError::Domain) }).await;

    assert_eq!(result.unwrap_err(), CallerError::Domain);
    assert_eq!(store.open_sessions(), 0);
}

#[tokio::test]
async fn session_is_released_when_the_work_future_is_dropped() {
    let store = MemoryStore::new();

    // The unit of work never completes; the timeout drops it mid-flight
    let result = tokio::time::timeout(
        std::time::Duration::from_millis(10),
        call::<_, _, _, (), StoreError>(&store, |_session| async move {
            std::future::pending::<()>().await;
            Ok(())
        }),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(store.open_sessions(), 0);
}
