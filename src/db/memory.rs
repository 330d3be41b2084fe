// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process token store.
//!
//! Backs the `env` store (seeded from configuration, lost on restart) and
//! tests, which can make reads or writes fail on demand.

use crate::error::AppError;
use crate::models::TokenRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    record: Arc<RwLock<Option<TokenRecord>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `record`.
    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record))),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn get_record(&self) -> Result<Option<TokenRecord>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Store("memory store read failure".to_string()));
        }
        Ok(self.record.read().await.clone())
    }

    pub async fn set_record(&self, record: &TokenRecord) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Store("memory store write failure".to_string()));
        }
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}
