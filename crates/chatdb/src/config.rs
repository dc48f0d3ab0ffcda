// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration

use chat_core::ChannelId;
use thiserror::Error;

pub const DEFAULT_BROKER_ADDR: &str = "localhost:9092";
pub const DEFAULT_STORE_ADDR: &str = "localhost:9042";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50054";
pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_CHANNEL: i64 = 211;

/// Daemon configuration.
///
/// Every value has a default; deployments override individual fields
/// rather than supplying a full config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log broker address
    pub broker_addr: String,
    /// Durable store address
    pub store_addr: String,
    /// TCP address the query server listens on
    pub listen_addr: String,
    /// Rows per recent-history page when the client does not ask for a
    /// specific count
    pub page_size: usize,
    /// The channel this daemon materializes
    pub channel: ChannelId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker_addr: DEFAULT_BROKER_ADDR.to_string(),
            store_addr: DEFAULT_STORE_ADDR.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            channel: ChannelId(DEFAULT_CHANNEL),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.listen_addr.is_empty() {
            return Err(ConfigError::EmptyListenAddr);
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("listen address must not be empty")]
    EmptyListenAddr,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
