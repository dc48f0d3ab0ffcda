// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped access to the durable store

use crate::traits::{StoreConnector, StoreError};
use std::future::Future;

/// Acquire one session, run one unit of work, release the session.
///
/// This is the sole sanctioned way any component touches the durable
/// store. The session is owned by the unit of work and dropped (and so
/// released) on every exit path: completion, a returned error, or the
/// future being dropped mid-flight. The inner result or error is
/// propagated unchanged; connection failures convert into the caller's
/// error type.
pub async fn call<C, F, Fut, T, E>(connector: &C, work: F) -> Result<T, E>
where
    C: StoreConnector,
    F: FnOnce(C::Session) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<StoreError>,
{
    let session = connector.connect().await.map_err(E::from)?;
    work(session).await
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
