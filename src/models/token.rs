// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page access token record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Long-lived page token and when it was last exchanged.
///
/// Stored as `{"token": "...", "refreshed": "<RFC3339>"}`; a missing or null
/// `refreshed` means the token has never been refreshed by us and should be
/// treated as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    #[serde(rename = "refreshed", default)]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// A record seeded from configuration, never refreshed.
    pub fn seed(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refreshed_at: None,
        }
    }

    /// A record for a token obtained at `at`.
    pub fn refreshed(token: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            refreshed_at: Some(at),
        }
    }

    /// Fetches must not be attempted with an empty token.
    pub fn is_usable(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
