// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed token storage.
//!
//! The record lives in a single document, `site_tokens/{page_id}`.

use crate::db::collections;
use crate::error::AppError;
use crate::models::TokenRecord;

/// Firestore token store client.
#[derive(Clone)]
pub struct FirestoreTokenStore {
    client: Option<firestore::FirestoreDb>,
    document_id: String,
}

impl FirestoreTokenStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, document_id: &str) -> Result<Self, AppError> {
        let client = if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            Self::create_emulator_client(project_id).await?
        } else {
            firestore::FirestoreDb::new(project_id)
                .await
                .map_err(|e| AppError::Store(format!("Failed to connect to Firestore: {}", e)))?
        };

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            document_id: document_id.to_string(),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<firestore::FirestoreDb, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::Store(format!("Failed to connect to Firestore Emulator: {}", e)))
    }

    /// Offline client; every operation fails with a store error.
    pub fn new_mock(document_id: &str) -> Self {
        Self {
            client: None,
            document_id: document_id.to_string(),
        }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Store("Database not connected (offline mode)".to_string()))
    }

    /// Load the token document, `None` if it has never been written.
    pub async fn get_record(&self) -> Result<Option<TokenRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TOKENS)
            .obj()
            .one(&self.document_id)
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }

    /// Overwrite the token document.
    pub async fn set_record(&self, record: &TokenRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TOKENS)
            .document_id(self.document_id.clone())
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        Ok(())
    }
}
