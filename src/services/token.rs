// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page token lifecycle: staleness check, exchange, persistence.
//!
//! A failed refresh is never fatal. The previously stored token keeps being
//! used and the failure only shows up in logs and in [`TokenOutcome::error`].

use crate::db::TokenStore;
use crate::error::AppError;
use crate::models::TokenRecord;
use crate::services::graph::GraphClient;
use crate::time_utils::redact;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// True if a token last refreshed at `refreshed_at` should be exchanged now.
///
/// A token we have never refreshed is always stale.
pub fn needs_refresh(
    refreshed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold: Duration,
) -> bool {
    match refreshed_at {
        None => true,
        Some(at) => now - at > threshold,
    }
}

/// Result of obtaining the current token.
#[derive(Debug, Clone)]
pub struct TokenOutcome {
    /// Token to use for this request.
    pub record: TokenRecord,
    /// A new token was obtained from the exchange endpoint.
    pub refreshed: bool,
    /// The new token was persisted (only meaningful when `refreshed`).
    pub persisted: bool,
    /// Why a refresh attempt failed, if one did.
    pub error: Option<String>,
}

impl TokenOutcome {
    fn unchanged(record: TokenRecord) -> Self {
        Self {
            record,
            refreshed: false,
            persisted: false,
            error: None,
        }
    }
}

/// Token service shared by the content routes, the token-manager route and
/// the scheduled refresh.
#[derive(Clone)]
pub struct TokenService {
    client: GraphClient,
    store: TokenStore,
    threshold: Duration,
    /// Serializes refreshes within this process.
    refresh_lock: Arc<Mutex<()>>,
}

impl TokenService {
    pub fn new(
        client: GraphClient,
        store: TokenStore,
        refresh_after_days: i64,
    ) -> Result<Self, AppError> {
        let threshold = Duration::try_days(refresh_after_days)
            .filter(|t| *t > Duration::zero())
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Invalid refresh threshold: {} days",
                    refresh_after_days
                ))
            })?;

        Ok(Self {
            client,
            store,
            threshold,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn needs_refresh(&self, refreshed_at: Option<DateTime<Utc>>) -> bool {
        needs_refresh(refreshed_at, Utc::now(), self.threshold)
    }

    /// Current token, refreshing first if it is stale.
    pub async fn current_token(&self) -> TokenOutcome {
        let record = self.store.read().await;
        if !self.needs_refresh(record.refreshed_at) {
            return TokenOutcome::unchanged(record);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited.
        let record = self.store.read().await;
        if !self.needs_refresh(record.refreshed_at) {
            return TokenOutcome::unchanged(record);
        }

        self.refresh_and_store(record).await
    }

    /// Refresh regardless of staleness (token rejected upstream, or an
    /// explicit request).
    ///
    /// With `rejected` set, the exchange is skipped when the stored token has
    /// already been replaced by a concurrent refresh, and that token is
    /// returned instead.
    pub async fn force_refresh(&self, rejected: Option<&str>) -> TokenOutcome {
        let _guard = self.refresh_lock.lock().await;
        let record = self.store.read().await;

        if let Some(rejected) = rejected {
            if record.is_usable() && record.token != rejected {
                tracing::debug!(
                    token = %redact(&record.token),
                    "Token already replaced, skipping exchange"
                );
                return TokenOutcome::unchanged(record);
            }
        }

        self.refresh_and_store(record).await
    }

    /// Exchange `current` for a new long-lived token.
    pub async fn refresh(&self, current: &TokenRecord) -> Result<TokenRecord, AppError> {
        if !current.is_usable() {
            return Err(AppError::MissingCredentials("FACEBOOK_LONG_LIVED_TOKEN"));
        }

        let token = self.client.exchange_token(&current.token).await?;
        Ok(TokenRecord::refreshed(token, Utc::now()))
    }

    async fn refresh_and_store(&self, current: TokenRecord) -> TokenOutcome {
        tracing::info!(
            token = %redact(&current.token),
            refreshed_at = ?current.refreshed_at,
            "Refreshing page token"
        );

        match self.refresh(&current).await {
            Ok(record) => {
                let persisted = self.store.write(&record).await;
                if !persisted {
                    tracing::warn!("Refreshed token not persisted, using it for this process only");
                }
                tracing::info!(token = %redact(&record.token), persisted, "Page token refreshed");
                TokenOutcome {
                    record,
                    refreshed: true,
                    persisted,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, using existing token");
                TokenOutcome {
                    error: Some(e.to_string()),
                    ..TokenOutcome::unchanged(current)
                }
            }
        }
    }
}
