// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Background refresh task.

use kingshead_api::config::Config;
use kingshead_api::services::spawn_refresh_task;
use std::time::Duration;

mod common;
use common::{ContentMode, MockGraph, FRESH_TOKEN, STORED_TOKEN};

#[tokio::test]
async fn test_zero_interval_disables_task() {
    let (state, _) = common::create_state(Config::test_default(), None);
    assert!(spawn_refresh_task(state.tokens.clone(), Duration::ZERO).is_none());
}

#[tokio::test]
async fn test_first_tick_refreshes_stale_token() {
    let mock = MockGraph::new(ContentMode::Live, true);
    let config = common::test_config(&mock.spawn().await);
    let record = common::record_refreshed_days_ago(STORED_TOKEN, 60);
    let (state, memory) = common::create_state(config, Some(record));

    let task = spawn_refresh_task(state.tokens.clone(), Duration::from_secs(3600))
        .expect("task should be spawned");

    let mut refreshed = false;
    for _ in 0..50 {
        if let Some(r) = memory.get_record().await.unwrap() {
            if r.token == FRESH_TOKEN {
                refreshed = true;
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    task.abort();

    assert!(refreshed, "stale token should be refreshed on first tick");
    assert_eq!(mock.exchange_calls(), 1);
}

#[tokio::test]
async fn test_fresh_token_is_left_alone() {
    let mock = MockGraph::new(ContentMode::Live, true);
    let config = common::test_config(&mock.spawn().await);
    let record = common::record_refreshed_days_ago(STORED_TOKEN, 2);
    let (state, memory) = common::create_state(config, Some(record.clone()));

    let task = spawn_refresh_task(state.tokens.clone(), Duration::from_secs(3600)).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    task.abort();

    assert_eq!(mock.exchange_calls(), 0);
    assert_eq!(memory.get_record().await.unwrap(), Some(record));
}
