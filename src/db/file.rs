// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local JSON file token store.

use crate::error::AppError;
use crate::models::TokenRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Token record kept in a JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; `Ok(None)` if it does not exist yet.
    pub async fn get_record(&self) -> Result<Option<TokenRecord>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Store(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Store(format!("Corrupt token file {}: {}", self.path.display(), e)))
    }

    /// Write the record to a sibling temp file and rename it into place.
    pub async fn set_record(&self, record: &TokenRecord) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(record)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode token: {}", e)))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &body)
            .await
            .map_err(|e| AppError::Store(format!("Failed to write {}: {}", tmp.display(), e)))?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AppError::Store(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| ".token.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
