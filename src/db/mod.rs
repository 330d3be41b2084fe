// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token storage.
//!
//! [`TokenStore`] is the one interface the rest of the crate sees. The
//! backend is picked at startup; reads never fail (they fall back to the
//! configured seed token) and writes report success as a bool.

pub mod file;
pub mod firestore;
pub mod memory;

pub use file::FileTokenStore;
pub use firestore::FirestoreTokenStore;
pub use memory::MemoryTokenStore;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::TokenRecord;

/// Collection names as constants.
pub mod collections {
    pub const TOKENS: &str = "site_tokens";
}

/// Concrete storage medium behind a [`TokenStore`].
#[derive(Clone)]
pub enum Backend {
    Memory(MemoryTokenStore),
    File(FileTokenStore),
    Firestore(FirestoreTokenStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::File(_) => "file",
            Backend::Firestore(_) => "firestore",
        }
    }

    async fn get_record(&self) -> Result<Option<TokenRecord>, AppError> {
        match self {
            Backend::Memory(s) => s.get_record().await,
            Backend::File(s) => s.get_record().await,
            Backend::Firestore(s) => s.get_record().await,
        }
    }

    async fn set_record(&self, record: &TokenRecord) -> Result<(), AppError> {
        match self {
            Backend::Memory(s) => s.set_record(record).await,
            Backend::File(s) => s.set_record(record).await,
            Backend::Firestore(s) => s.set_record(record).await,
        }
    }
}

/// Persistent page token with an environment-default fallback.
#[derive(Clone)]
pub struct TokenStore {
    backend: Backend,
    default_token: String,
}

impl TokenStore {
    pub fn new(backend: Backend, default_token: impl Into<String>) -> Self {
        Self {
            backend,
            default_token: default_token.into(),
        }
    }

    /// Build the backend selected by `config.store_backend`.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let backend = match config.store_backend {
            StoreBackend::Env => Backend::Memory(MemoryTokenStore::new()),
            StoreBackend::File => Backend::File(FileTokenStore::new(&config.token_file_path)),
            StoreBackend::Firestore => {
                let project = config
                    .gcp_project_id
                    .as_deref()
                    .ok_or(AppError::MissingCredentials("GCP_PROJECT_ID"))?;
                Backend::Firestore(FirestoreTokenStore::new(project, &config.page_id).await?)
            }
        };

        tracing::info!(backend = backend.name(), "Token store initialized");
        Ok(Self::new(backend, config.default_token.clone()))
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Seed record used whenever the backend has nothing usable.
    pub fn default_record(&self) -> TokenRecord {
        TokenRecord::seed(self.default_token.clone())
    }

    /// Current record. Never fails: an empty, unreadable or blank stored
    /// record yields the seed token with no refresh time.
    pub async fn read(&self) -> TokenRecord {
        match self.backend.get_record().await {
            Ok(Some(record)) if record.is_usable() => record,
            Ok(Some(_)) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    "Stored token is blank, using default"
                );
                self.default_record()
            }
            Ok(None) => {
                tracing::debug!(backend = self.backend.name(), "No stored token, using default");
                self.default_record()
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    error = %e,
                    "Failed to read token, using default"
                );
                self.default_record()
            }
        }
    }

    /// Persist `record`. Failures are logged and reported as `false`.
    pub async fn write(&self, record: &TokenRecord) -> bool {
        match self.backend.set_record(record).await {
            Ok(()) => {
                tracing::debug!(backend = self.backend.name(), "Token record written");
                true
            }
            Err(e) => {
                tracing::error!(
                    backend = self.backend.name(),
                    error = %e,
                    "Failed to write token"
                );
                false
            }
        }
    }
}
