// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publisher and subscriber connection settings

use crate::traits::BrokerError;

/// Acknowledgment level required before a publish succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredAcks {
    /// All in-sync replicas must acknowledge
    #[default]
    All,
    /// The partition leader alone
    Leader,
}

/// Publisher connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublisherConfig {
    pub required_acks: RequiredAcks,
    /// Bounded retry count before a publish fails. Must be at least 1.
    pub max_retries: u32,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            required_acks: RequiredAcks::All,
            max_retries: 5,
        }
    }
}

impl PublisherConfig {
    pub fn validate(&self) -> Result<(), BrokerError> {
        if self.max_retries < 1 {
            return Err(BrokerError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Subscriber connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberConfig {
    /// Deliver consumer-side errors to the caller instead of dropping
    /// them silently
    pub surface_errors: bool,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            surface_errors: true,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
