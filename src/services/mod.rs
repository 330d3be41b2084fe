// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod content;
pub mod graph;
pub mod scheduler;
pub mod token;

pub use content::{ContentService, ContentSource, FetchOutcome};
pub use graph::GraphClient;
pub use scheduler::spawn_refresh_task;
pub use token::{needs_refresh, TokenOutcome, TokenService};
