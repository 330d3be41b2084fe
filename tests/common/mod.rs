// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use kingshead_api::config::Config;
use kingshead_api::db::{Backend, MemoryTokenStore, TokenStore};
use kingshead_api::models::TokenRecord;
use kingshead_api::routes::create_router;
use kingshead_api::AppState;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Token the mock exchange endpoint hands out.
#[allow(dead_code)]
pub const FRESH_TOKEN: &str = "fresh-long-lived-token";

/// Token the tests seed the store with.
#[allow(dead_code)]
pub const STORED_TOKEN: &str = "stored-long-lived-token";

/// How the mock answers content requests.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// 200 with `limit` generated items
    Live,
    /// 500 with a plain body
    Fail,
    /// Graph code 190 for every token
    Expired,
    /// Graph code 190 unless the token is [`FRESH_TOKEN`]
    ExpiredUnlessFresh,
    /// 429
    RateLimited,
}

/// In-process stand-in for the Graph API.
#[derive(Clone)]
pub struct MockGraph {
    pub content_mode: ContentMode,
    pub exchange_ok: bool,
    pub content_calls: Arc<AtomicUsize>,
    pub exchange_calls: Arc<AtomicUsize>,
    /// Query parameters of every content request, in order.
    pub content_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

#[allow(dead_code)]
impl MockGraph {
    pub fn new(content_mode: ContentMode, exchange_ok: bool) -> Self {
        Self {
            content_mode,
            exchange_ok,
            content_calls: Arc::new(AtomicUsize::new(0)),
            exchange_calls: Arc::new(AtomicUsize::new(0)),
            content_queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.content_queries.lock().unwrap().last().cloned()
    }

    /// Bind on an ephemeral port; returns the base URL to configure.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/v19.0/oauth/access_token", get(exchange))
            .route("/v19.0/{page}/{edge}", get(content))
            .with_state(self.clone());
        let (_handle, addr) = spawn_axum(router).await;
        format!("http://{}", addr)
    }
}

fn graph_error(status: StatusCode, code: i64, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": { "message": message, "type": "OAuthException", "code": code }
        })),
    )
        .into_response()
}

async fn exchange(
    State(mock): State<MockGraph>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.exchange_calls.fetch_add(1, Ordering::SeqCst);

    if !mock.exchange_ok || params.get("grant_type").map(String::as_str) != Some("fb_exchange_token") {
        return graph_error(StatusCode::BAD_REQUEST, 1, "Error validating client secret.");
    }

    Json(json!({
        "access_token": FRESH_TOKEN,
        "token_type": "bearer",
        "expires_in": 5_184_000
    }))
    .into_response()
}

async fn content(
    State(mock): State<MockGraph>,
    Path((_page, edge)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.content_calls.fetch_add(1, Ordering::SeqCst);
    mock.content_queries.lock().unwrap().push(params.clone());

    let token = params.get("access_token").cloned().unwrap_or_default();
    let expired = graph_error(
        StatusCode::BAD_REQUEST,
        190,
        "Error validating access token: Session has expired",
    );

    match mock.content_mode {
        ContentMode::Fail => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        ContentMode::Expired => return expired,
        ContentMode::ExpiredUnlessFresh if token != FRESH_TOKEN => return expired,
        ContentMode::RateLimited => {
            return graph_error(StatusCode::TOO_MANY_REQUESTS, 4, "Application request limit reached")
        }
        _ => {}
    }

    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(25);
    let data: Vec<_> = (0..limit)
        .map(|i| match edge.as_str() {
            "events" => json!({
                "id": format!("live-event-{}", i),
                "name": format!("Live event {}", i),
                "start_time": "2026-06-06T18:00:00+0000"
            }),
            _ => json!({
                "id": format!("live-post-{}", i),
                "message": format!("Live post {}", i),
                "created_time": "2026-06-01T12:00:00+0000",
                "permalink_url": "https://www.facebook.com/KingsHeadCacklebury"
            }),
        })
        .collect();

    Json(json!({ "data": data, "paging": {} })).into_response()
}

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Test config pointed at `graph_base_url`.
#[allow(dead_code)]
pub fn test_config(graph_base_url: &str) -> Config {
    Config {
        graph_base_url: graph_base_url.to_string(),
        ..Config::test_default()
    }
}

/// A record refreshed `days_ago` days ago.
#[allow(dead_code)]
pub fn record_refreshed_days_ago(token: &str, days_ago: i64) -> TokenRecord {
    TokenRecord::refreshed(token, Utc::now() - Duration::days(days_ago))
}

/// Memory-backed store, optionally seeded.
#[allow(dead_code)]
pub fn memory_store(config: &Config, record: Option<TokenRecord>) -> (TokenStore, MemoryTokenStore) {
    let memory = match record {
        Some(r) => MemoryTokenStore::with_record(r),
        None => MemoryTokenStore::new(),
    };
    let store = TokenStore::new(Backend::Memory(memory.clone()), config.default_token.clone());
    (store, memory)
}

/// Build app state around a memory store holding `record`.
#[allow(dead_code)]
pub fn create_state(config: Config, record: Option<TokenRecord>) -> (Arc<AppState>, MemoryTokenStore) {
    let (store, memory) = memory_store(&config, record);
    let state = Arc::new(AppState::new(config, store).expect("app state"));
    (state, memory)
}

/// Create a test app and return the router, the shared state and the
/// backing memory store.
#[allow(dead_code)]
pub fn create_test_app(
    config: Config,
    record: Option<TokenRecord>,
) -> (axum::Router, Arc<AppState>, MemoryTokenStore) {
    let (state, memory) = create_state(config, record);
    (create_router(state.clone()), state, memory)
}
