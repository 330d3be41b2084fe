// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page content fetching with fallback.
//!
//! Every fetch ends in one of two states, live data or canned fallback data,
//! and callers treat both as success.

use crate::error::AppError;
use crate::models::{fallback_items, ContentItem, ContentKind};
use crate::services::graph::GraphClient;
use crate::services::token::TokenService;
use chrono::Utc;
use serde::Serialize;

/// Where the returned items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Live,
    Fallback,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentSource::Live => "live",
            ContentSource::Fallback => "fallback",
        }
    }
}

/// Result of [`ContentService::fetch`].
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub items: Vec<ContentItem>,
    pub source: ContentSource,
    /// A forced refresh and retry happened after the token was rejected.
    pub retried: bool,
}

/// Fetches posts and events for the configured page.
#[derive(Clone)]
pub struct ContentService {
    client: GraphClient,
    tokens: TokenService,
}

impl ContentService {
    pub fn new(client: GraphClient, tokens: TokenService) -> Self {
        Self { client, tokens }
    }

    /// Fetch up to `limit` items of `kind`. Never fails; any upstream error
    /// yields the fallback list truncated to `limit`.
    pub async fn fetch(&self, kind: ContentKind, limit: u32) -> FetchOutcome {
        let token = self.tokens.current_token().await;
        if !token.record.is_usable() {
            tracing::warn!(%kind, "No page token available");
            return Self::fallback(kind, limit, false);
        }

        let mut retried = false;
        let result = match self.client.get_content(&token.record.token, kind, limit).await {
            Err(e) if e.is_token_error() => {
                retried = true;
                self.refresh_and_retry(kind, limit, &token.record.token, e).await
            }
            other => other,
        };

        match result {
            Ok(items) => {
                tracing::info!(%kind, count = items.len(), retried, "Fetched page content");
                FetchOutcome {
                    items,
                    source: ContentSource::Live,
                    retried,
                }
            }
            Err(e) => {
                tracing::warn!(%kind, error = %e, retried, "Graph fetch failed, using fallback");
                Self::fallback(kind, limit, retried)
            }
        }
    }

    /// One forced refresh, then one retry. Returns the original error if no
    /// token other than `rejected` is available.
    async fn refresh_and_retry(
        &self,
        kind: ContentKind,
        limit: u32,
        rejected: &str,
        original: AppError,
    ) -> Result<Vec<ContentItem>, AppError> {
        tracing::info!(%kind, error = %original, "Page token rejected, forcing refresh");

        let refreshed = self.tokens.force_refresh(Some(rejected)).await;
        if refreshed.record.token == rejected {
            return Err(original);
        }

        self.client
            .get_content(&refreshed.record.token, kind, limit)
            .await
    }

    fn fallback(kind: ContentKind, limit: u32, retried: bool) -> FetchOutcome {
        FetchOutcome {
            items: fallback_items(kind, limit, Utc::now()),
            source: ContentSource::Fallback,
            retried,
        }
    }
}
