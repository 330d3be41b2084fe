// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Internal API key check for token management routes.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Require `x-api-key` to match `INTERNAL_API_KEY`.
///
/// With no key configured the route is open, matching local development.
pub async fn require_internal_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.internal_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    if provided != Some(expected) {
        tracing::warn!(
            path = %request.uri().path(),
            has_key = provided.is_some(),
            "Blocked token management request with invalid API key"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
