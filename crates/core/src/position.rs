// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log positions (offsets)

use serde::{Deserialize, Serialize};

/// Position of a message within one (topic, partition) pair.
///
/// Offsets are assigned by the log broker, strictly increasing per
/// partition with no gaps under normal operation. This system never
/// invents or renumbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogPosition(pub i64);

impl LogPosition {
    /// The position immediately after this one.
    ///
    /// Marks the hand-off boundary between catch-up replay and live
    /// consumption: everything at and before `self` has been processed.
    pub fn next(self) -> LogPosition {
        LogPosition(self.0 + 1)
    }
}

impl std::fmt::Display for LogPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;
