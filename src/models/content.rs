// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facebook page content passed through to the site.
//!
//! Records are not validated or normalized; unknown upstream fields are kept
//! in `extra` and serialized back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Largest `limit` forwarded upstream.
pub const MAX_LIMIT: u32 = 100;

/// Which page collection to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Posts,
    Events,
}

impl ContentKind {
    /// Lenient parse; anything other than `events`/`posts` is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" => Some(ContentKind::Posts),
            "events" => Some(ContentKind::Events),
            _ => None,
        }
    }

    /// Graph edge name under the page node.
    pub fn edge(self) -> &'static str {
        match self {
            ContentKind::Posts => "posts",
            ContentKind::Events => "events",
        }
    }

    /// Graph `fields` selection.
    pub fn fields(self) -> &'static str {
        match self {
            ContentKind::Posts => "message,created_time,full_picture,permalink_url",
            ContentKind::Events => "name,description,start_time,end_time,cover",
        }
    }

    pub fn default_limit(self) -> u32 {
        match self {
            ContentKind::Posts => 5,
            ContentKind::Events => 3,
        }
    }

    /// Resolve a requested limit: zero or absent means the default, and the
    /// result never exceeds [`MAX_LIMIT`].
    pub fn effective_limit(self, requested: Option<u32>) -> u32 {
        match requested {
            Some(0) | None => self.default_limit(),
            Some(n) => n.min(MAX_LIMIT),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.edge())
    }
}

/// A page post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Event cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCover {
    pub source: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<EventCover>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One item of either collection, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentItem {
    Post(Post),
    Event(Event),
}

impl ContentItem {
    pub fn id(&self) -> &str {
        match self {
            ContentItem::Post(p) => &p.id,
            ContentItem::Event(e) => &e.id,
        }
    }
}

/// Graph list envelope: `{"data": [...], "paging": {...}}`.
#[derive(Debug, Deserialize)]
pub struct GraphPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}
