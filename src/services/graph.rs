// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facebook Graph API client.
//!
//! Handles:
//! - Page posts and events listing with field selection
//! - Long-lived token exchange (`fb_exchange_token`)
//! - Error classification (expired token vs. rate limit vs. other)

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ContentItem, ContentKind, Event, GraphPage, Post};
use reqwest::StatusCode;
use serde::Deserialize;

/// Graph error code for an expired, revoked or otherwise invalid token.
const GRAPH_CODE_INVALID_TOKEN: i64 = 190;

/// Graph error codes that mean "throttled".
const GRAPH_CODES_RATE_LIMIT: [i64; 4] = [4, 17, 32, 613];

/// Graph API client.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    /// Origin plus version, e.g. `https://graph.facebook.com/v19.0`
    base_url: String,
    page_id: String,
    app_id: Option<String>,
    app_secret: Option<String>,
}

impl GraphClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: format!("{}/{}", config.graph_base_url, config.graph_version),
            page_id: config.page_id.clone(),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
        })
    }

    /// List the page's posts or events.
    pub async fn get_content(
        &self,
        access_token: &str,
        kind: ContentKind,
        limit: u32,
    ) -> Result<Vec<ContentItem>, AppError> {
        let url = format!("{}/{}/{}", self.base_url, self.page_id, kind.edge());
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("fields", kind.fields()),
                ("limit", limit.as_str()),
                ("access_token", access_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::GraphApi(e.to_string()))?;

        let items = match kind {
            ContentKind::Posts => self
                .check_response_json::<GraphPage<Post>>(response)
                .await?
                .data
                .into_iter()
                .map(ContentItem::Post)
                .collect(),
            ContentKind::Events => self
                .check_response_json::<GraphPage<Event>>(response)
                .await?
                .data
                .into_iter()
                .map(ContentItem::Event)
                .collect(),
        };

        Ok(items)
    }

    /// Exchange a long-lived token for a fresh one.
    ///
    /// Fails with `MissingCredentials` before any request when the app id or
    /// secret is not configured.
    pub async fn exchange_token(&self, current_token: &str) -> Result<String, AppError> {
        let app_id = self
            .app_id
            .as_deref()
            .ok_or(AppError::MissingCredentials("FACEBOOK_APP_ID"))?;
        let app_secret = self
            .app_secret
            .as_deref()
            .ok_or(AppError::MissingCredentials("FACEBOOK_APP_SECRET"))?;

        let url = format!("{}/oauth/access_token", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("grant_type", "fb_exchange_token"),
                ("client_id", app_id),
                ("client_secret", app_secret),
                ("fb_exchange_token", current_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::GraphApi(format!("Token exchange request failed: {}", e)))?;

        let body: TokenExchangeResponse = self.check_response_json(response).await?;

        match body.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::GraphApi(
                "No access token in exchange response".to_string(),
            )),
        }
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GraphApi(format!("JSON parse error: {}", e)))
    }
}

/// Map a failed Graph response onto an [`AppError`].
pub fn classify_error(status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<GraphErrorEnvelope>(body)
        .ok()
        .map(|e| e.error);

    let code = detail.as_ref().and_then(|d| d.code);
    let message = detail
        .as_ref()
        .and_then(|d| d.message.clone())
        .unwrap_or_else(|| body.to_string());

    if code == Some(GRAPH_CODE_INVALID_TOKEN) || status == StatusCode::UNAUTHORIZED {
        return AppError::TokenExpired(message);
    }

    if status == StatusCode::TOO_MANY_REQUESTS
        || code.is_some_and(|c| GRAPH_CODES_RATE_LIMIT.contains(&c))
    {
        tracing::warn!(status = %status, code = ?code, "Graph API rate limit hit");
        return AppError::RateLimited;
    }

    AppError::GraphApi(format!("HTTP {}: {}", status, message))
}

/// Graph error envelope: `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: Option<String>,
    code: Option<i64>,
}

/// Response of `GET /oauth/access_token`.
#[derive(Debug, Clone, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_190_is_token_error() {
        let body = r#"{"error":{"message":"Error validating access token: Session has expired","type":"OAuthException","code":190,"error_subcode":463}}"#;
        let err = classify_error(StatusCode::BAD_REQUEST, body);
        assert!(err.is_token_error());
        assert!(err.to_string().contains("Session has expired"));
    }

    #[test]
    fn test_401_is_token_error() {
        assert!(classify_error(StatusCode::UNAUTHORIZED, "").is_token_error());
    }

    #[test]
    fn test_rate_limits() {
        assert!(classify_error(StatusCode::TOO_MANY_REQUESTS, "").is_rate_limited());

        let body = r#"{"error":{"message":"Application request limit reached","code":4}}"#;
        assert!(classify_error(StatusCode::FORBIDDEN, body).is_rate_limited());
    }

    #[test]
    fn test_other_errors() {
        let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream down");
        assert!(!err.is_token_error());
        assert!(!err.is_rate_limited());
        assert!(matches!(err, AppError::GraphApi(ref m) if m.contains("upstream down")));
    }
}
