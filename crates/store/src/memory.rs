// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process durable store for tests and single-node runs

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chat_core::{ChannelId, LogPosition};

use crate::model::MaterializedMessage;
use crate::traits::{StoreConnector, StoreError, StoreSession};

/// In-process messages table.
///
/// Rows live in a `BTreeMap` keyed by `(channel, offset)`: map insertion
/// gives the idempotent overwrite and the key order gives descending
/// scans. Cloning yields another handle to the same store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Mutex<BTreeMap<(i64, i64), MaterializedMessage>>,
    open_sessions: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions currently held open. Tests assert this falls back to
    /// zero after every scoped call.
    pub fn open_sessions(&self) -> usize {
        self.inner.open_sessions.load(Ordering::SeqCst)
    }

    /// Total rows across all channels
    pub fn row_count(&self) -> usize {
        self.inner.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Snapshot of one channel's rows in ascending offset order
    pub fn rows(&self, channel: ChannelId) -> Vec<MaterializedMessage> {
        let rows = self.inner.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.range((channel.0, i64::MIN)..=(channel.0, i64::MAX))
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Make subsequent inserts fail, for exercising dispatch-failure
    /// paths
    pub fn fail_inserts(&self, fail: bool) {
        self.inner.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreConnector for MemoryStore {
    type Session = MemorySession;

    async fn connect(&self) -> Result<MemorySession, StoreError> {
        self.inner.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            inner: Arc::clone(&self.inner),
        })
    }
}

/// One scoped session over a [`MemoryStore`]; released on drop
pub struct MemorySession {
    inner: Arc<Inner>,
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.inner.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn insert_message(&mut self, row: &MaterializedMessage) -> Result<(), StoreError> {
        if self.inner.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected insert failure".to_string()));
        }
        let mut rows = self.inner.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.insert((row.channel_id.0, row.offset.0), row.clone());
        Ok(())
    }

    async fn most_recent(
        &mut self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<MaterializedMessage>, StoreError> {
        let rows = self.inner.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .range((channel.0, i64::MIN)..=(channel.0, i64::MAX))
            .rev()
            .take(limit)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn max_offset(
        &mut self,
        channel: ChannelId,
    ) -> Result<Option<LogPosition>, StoreError> {
        let rows = self.inner.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .range((channel.0, i64::MIN)..=(channel.0, i64::MAX))
            .next_back()
            .map(|((_, offset), _)| LogPosition(*offset)))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
