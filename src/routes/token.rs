// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token manager routes.
//!
//! Report whether a usable page token exists and refresh it when stale. The
//! token itself is never returned.

use super::facebook::preflight;
use crate::middleware::require_internal_key;
use crate::services::TokenOutcome;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token manager routes. The forced refresh needs the internal API key.
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let forced = Router::new()
        .route("/token-manager/refresh", post(force_refresh).options(preflight))
        .route_layer(middleware::from_fn_with_state(state, require_internal_key));

    Router::new()
        .route("/token-manager", get(check_token).options(preflight))
        .merge(forced)
}

/// Token manager status body.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenStatus {
    pub success: bool,
    pub refreshed: bool,
    pub message: String,
    pub error: Option<String>,
}

impl From<TokenOutcome> for TokenStatus {
    fn from(outcome: TokenOutcome) -> Self {
        let success = outcome.record.is_usable();
        let message = if !success {
            "No page token available"
        } else if outcome.refreshed && !outcome.persisted {
            "Token refreshed but could not be saved"
        } else if outcome.refreshed {
            "Token refreshed"
        } else if outcome.error.is_some() {
            "Token refresh failed, using existing token"
        } else {
            "Token is valid and up to date"
        };

        Self {
            success,
            refreshed: outcome.refreshed,
            message: message.to_string(),
            error: outcome.error,
        }
    }
}

fn status_response(outcome: TokenOutcome) -> (StatusCode, Json<TokenStatus>) {
    let status = TokenStatus::from(outcome);
    let code = if status.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (code, Json(status))
}

/// `GET /token-manager`: refresh if stale.
async fn check_token(State(state): State<Arc<AppState>>) -> (StatusCode, Json<TokenStatus>) {
    status_response(state.tokens.current_token().await)
}

/// `POST /token-manager/refresh`: refresh now.
async fn force_refresh(State(state): State<Arc<AppState>>) -> (StatusCode, Json<TokenStatus>) {
    tracing::info!("Forced token refresh requested");
    status_response(state.tokens.force_refresh(None).await)
}
