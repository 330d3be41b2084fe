// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Built once at startup and handed to services through `AppState`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Facebook page shown on the site (Kings Head, Cacklebury).
pub const DEFAULT_PAGE_ID: &str = "56005271774";

/// Long-lived page tokens last about 60 days; refresh a week early.
pub const DEFAULT_REFRESH_AFTER_DAYS: i64 = 53;

/// Which backend persists the page token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Seeded from the environment, refreshed tokens kept in process memory.
    Env,
    /// JSON file on local disk.
    File,
    /// Single Firestore document.
    Firestore,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "env" | "environment" => Ok(StoreBackend::Env),
            "file" => Ok(StoreBackend::File),
            "firestore" => Ok(StoreBackend::Firestore),
            other => Err(ConfigError::Invalid("TOKEN_STORE", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Facebook ---
    /// Facebook app ID used for token exchange
    pub app_id: Option<String>,
    /// Facebook app secret used for token exchange
    pub app_secret: Option<String>,
    /// Seed long-lived page token
    pub default_token: String,
    /// Page whose posts and events are proxied
    pub page_id: String,
    /// Graph API origin, overridable for tests
    pub graph_base_url: String,
    /// Graph API version path segment
    pub graph_version: String,

    // --- Token lifecycle ---
    pub store_backend: StoreBackend,
    pub token_file_path: PathBuf,
    /// Only needed for the Firestore backend
    pub gcp_project_id: Option<String>,
    pub refresh_after_days: i64,
    /// Interval of the background refresh check; zero disables it
    pub refresh_interval: Duration,
    /// Key required on `POST /token-manager/refresh` when set
    pub internal_api_key: Option<String>,

    // --- Server ---
    pub upstream_timeout: Duration,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Credentials are optional here; the refresh flow checks for them when
    /// it actually needs them.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = optional("TOKEN_STORE")
            .map(|v| v.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::File);

        let gcp_project_id = optional("GCP_PROJECT_ID");
        if store_backend == StoreBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        Ok(Self {
            app_id: optional("FACEBOOK_APP_ID"),
            app_secret: optional("FACEBOOK_APP_SECRET"),
            default_token: optional("FACEBOOK_LONG_LIVED_TOKEN").unwrap_or_default(),
            page_id: optional("FACEBOOK_PAGE_ID").unwrap_or_else(|| DEFAULT_PAGE_ID.to_string()),
            graph_base_url: optional("GRAPH_API_BASE_URL")
                .unwrap_or_else(|| "https://graph.facebook.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            graph_version: optional("GRAPH_API_VERSION").unwrap_or_else(|| "v19.0".to_string()),
            store_backend,
            token_file_path: optional("TOKEN_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".token.json")),
            gcp_project_id,
            refresh_after_days: refresh_days(parse_or(
                "TOKEN_REFRESH_AFTER_DAYS",
                DEFAULT_REFRESH_AFTER_DAYS,
            )?)?,
            refresh_interval: Duration::from_secs(parse_or("TOKEN_REFRESH_INTERVAL_SECS", 86_400)?),
            internal_api_key: optional("INTERNAL_API_KEY"),
            upstream_timeout: upstream_timeout(parse_or("UPSTREAM_TIMEOUT_SECS", 10)?)?,
            port: parse_or("PORT", 8080)?,
        })
    }

    /// Config for tests: in-memory store, no background task, dummy creds.
    pub fn test_default() -> Self {
        Self {
            app_id: Some("test_app_id".to_string()),
            app_secret: Some("test_app_secret".to_string()),
            default_token: "test_default_token".to_string(),
            page_id: DEFAULT_PAGE_ID.to_string(),
            graph_base_url: "http://127.0.0.1:9".to_string(),
            graph_version: "v19.0".to_string(),
            store_backend: StoreBackend::Env,
            token_file_path: PathBuf::from(".token.json"),
            gcp_project_id: None,
            refresh_after_days: DEFAULT_REFRESH_AFTER_DAYS,
            refresh_interval: Duration::ZERO,
            internal_api_key: Some("test_internal_key".to_string()),
            upstream_timeout: Duration::from_secs(2),
            port: 8080,
        }
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}

/// Staleness threshold in days: positive and representable as a duration.
fn refresh_days(days: i64) -> Result<i64, ConfigError> {
    if days <= 0 || chrono::TimeDelta::try_days(days).is_none() {
        return Err(ConfigError::Invalid(
            "TOKEN_REFRESH_AFTER_DAYS",
            days.to_string(),
        ));
    }
    Ok(days)
}

/// A zero timeout would fail every upstream call.
fn upstream_timeout(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid("UPSTREAM_TIMEOUT_SECS", secs.to_string()));
    }
    Ok(Duration::from_secs(secs))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
