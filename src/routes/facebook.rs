// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facebook content routes.
//!
//! Always answer 200 with a JSON array, live or fallback. The
//! `x-content-source` header tells the two apart.

use crate::models::ContentKind;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

/// Content routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/facebook", get(content_by_query).options(preflight))
        .route("/facebook/{kind}", get(content_by_path).options(preflight))
}

/// Query parameters, parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

impl ContentQuery {
    fn kind(&self) -> Option<ContentKind> {
        self.kind.as_deref().and_then(ContentKind::parse)
    }

    fn limit(&self) -> Option<u32> {
        self.limit.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

/// `GET /facebook?type=posts|events&limit=N`
async fn content_by_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let kind = query.kind().unwrap_or(ContentKind::Posts);
    respond(&state, kind, query.limit()).await
}

/// `GET /facebook/posts` or `/facebook/events`; the path wins over `?type=`.
async fn content_by_path(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let kind = ContentKind::parse(&segment)
        .or_else(|| query.kind())
        .unwrap_or(ContentKind::Posts);
    respond(&state, kind, query.limit()).await
}

async fn respond(state: &AppState, kind: ContentKind, requested: Option<u32>) -> Response {
    let limit = kind.effective_limit(requested);
    tracing::debug!(%kind, limit, "Content request");

    let outcome = state.content.fetch(kind, limit).await;

    (
        [(CONTENT_SOURCE_HEADER, outcome.source.as_str())],
        Json(outcome.items),
    )
        .into_response()
}

/// Plain `OPTIONS` without CORS preflight headers.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}
