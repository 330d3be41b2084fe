// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod content;
pub mod fallback;
pub mod token;

pub use content::{ContentItem, ContentKind, Event, EventCover, GraphPage, Post};
pub use fallback::fallback_items;
pub use token::TokenRecord;
