// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Access token expired or invalid: {0}")]
    TokenExpired(String),

    #[error("Graph API rate limit reached")]
    RateLimited,

    #[error("Graph API error: {0}")]
    GraphApi(String),

    #[error("Missing credential: {0}")]
    MissingCredentials(&'static str),

    #[error("Token store error: {0}")]
    Store(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when the upstream rejected the access token itself, meaning a
    /// forced refresh might recover the call.
    pub fn is_token_error(&self) -> bool {
        matches!(self, AppError::TokenExpired(_))
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::RateLimited)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::TokenExpired(msg) => {
                (StatusCode::BAD_GATEWAY, "token_expired", Some(msg.clone()))
            }
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited", None),
            AppError::GraphApi(msg) => (StatusCode::BAD_GATEWAY, "graph_error", Some(msg.clone())),
            AppError::MissingCredentials(name) => {
                tracing::error!(credential = %name, "Missing credential");
                (StatusCode::INTERNAL_SERVER_ERROR, "missing_credentials", None)
            }
            AppError::Store(msg) => {
                tracing::error!(error = %msg, "Token store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", None),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
