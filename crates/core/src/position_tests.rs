// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn positions_order_by_value() {
    assert!(LogPosition(3) < LogPosition(4));
    assert!(LogPosition(-1) < LogPosition(0));
    assert_eq!(LogPosition(7), LogPosition(7));
}

#[test]
fn next_advances_by_one() {
    assert_eq!(LogPosition(10).next(), LogPosition(11));
    assert_eq!(LogPosition(-1).next(), LogPosition(0));
}

#[test]
fn position_serializes_as_bare_integer() {
    let json = serde_json::to_string(&LogPosition(42)).unwrap();
    assert_eq!(json, "42");

    let back: LogPosition = serde_json::from_str("42").unwrap();
    assert_eq!(back, LogPosition(42));
}
