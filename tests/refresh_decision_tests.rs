// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Staleness decision for the page token.

use chrono::{Duration, Utc};
use kingshead_api::config::DEFAULT_REFRESH_AFTER_DAYS;
use kingshead_api::services::needs_refresh;

fn threshold() -> Duration {
    Duration::days(DEFAULT_REFRESH_AFTER_DAYS)
}

#[test]
fn test_missing_refresh_time_needs_refresh() {
    assert!(needs_refresh(None, Utc::now(), threshold()));
}

#[test]
fn test_refreshed_yesterday_is_fresh() {
    let now = Utc::now();
    assert!(!needs_refresh(Some(now - Duration::days(1)), now, threshold()));
}

#[test]
fn test_refreshed_sixty_days_ago_is_stale() {
    let now = Utc::now();
    assert!(needs_refresh(Some(now - Duration::days(60)), now, threshold()));
}

#[test]
fn test_boundary_around_threshold() {
    let now = Utc::now();
    assert!(!needs_refresh(Some(now - Duration::days(52)), now, threshold()));
    assert!(needs_refresh(Some(now - Duration::days(54)), now, threshold()));
}

#[test]
fn test_refresh_time_in_future_is_fresh() {
    // Clock skew between instances should not force a refresh.
    let now = Utc::now();
    assert!(!needs_refresh(Some(now + Duration::hours(1)), now, threshold()));
}
