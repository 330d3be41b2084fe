// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kings Head site API
//!
//! Backend for the pub's website: proxies the Facebook page's posts and
//! events, keeps the long-lived page token fresh, and serves canned content
//! whenever Facebook is unavailable.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::TokenStore;
use services::{ContentService, GraphClient, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
    pub content: ContentService,
}

impl AppState {
    /// Wire services from configuration and an already-built token store.
    pub fn new(config: Config, store: TokenStore) -> error::Result<Self> {
        let client = GraphClient::new(&config)?;
        let tokens = TokenService::new(client.clone(), store, config.refresh_after_days)?;
        let content = ContentService::new(client, tokens.clone());

        Ok(Self {
            config,
            tokens,
            content,
        })
    }
}
