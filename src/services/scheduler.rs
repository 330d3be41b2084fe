// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Periodic token refresh check.

use crate::services::token::TokenService;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run the refresh-if-stale check every `period`, starting immediately.
///
/// Returns `None` when `period` is zero (disabled).
pub fn spawn_refresh_task(tokens: TokenService, period: Duration) -> Option<JoinHandle<()>> {
    if period.is_zero() {
        tracing::info!("Scheduled token refresh disabled");
        return None;
    }

    tracing::info!(period_secs = period.as_secs(), "Scheduled token refresh enabled");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = tokens.current_token().await;
            match outcome.error {
                Some(error) => {
                    tracing::warn!(error = %error, "Scheduled token refresh failed")
                }
                None => tracing::info!(
                    refreshed = outcome.refreshed,
                    "Scheduled token refresh check complete"
                ),
            }
        }
    }))
}
