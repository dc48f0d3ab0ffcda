// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable store boundary: the materialized row model, session traits,
//! the scoped-call gateway, and the in-process store.

pub mod gateway;
mod memory;
mod model;
mod traits;

pub use memory::{MemorySession, MemoryStore};
pub use model::MaterializedMessage;
pub use traits::{StoreConnector, StoreError, StoreSession};
