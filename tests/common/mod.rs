//! Shared test utilities for the ssmtpl test suite.
//!
//! Provides in-memory [`ParameterStore`] implementations: a `MemoryStore`
//! that serves fixed values and records every call it receives, and a
//! `FailingStore` whose lookups always fail with a chosen store error.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::MemoryStore;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use ssmtpl::{ParameterStore, StoreError, StoreResult};

/// One recorded `get_parameter` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub region: Option<String>,
    pub decrypt: bool,
}

/// In-memory parameter store that records every call it receives.
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, value: &str) -> Self {
        self.values.insert(path.to_string(), value.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ParameterStore for MemoryStore {
    async fn get_parameter(
        &self,
        path: &str,
        region: Option<&str>,
        decrypt: bool,
    ) -> StoreResult<Option<String>> {
        self.calls.lock().push(RecordedCall {
            path: path.to_string(),
            region: region.map(ToString::to_string),
            decrypt,
        });
        Ok(self.values.get(path).cloned())
    }

    fn name(&self) -> &'static str {
        "in-memory store"
    }
}

/// A store whose every lookup fails with the given error.
pub struct FailingStore {
    error: fn(&str) -> StoreError,
}

impl FailingStore {
    pub fn access_denied() -> Arc<Self> {
        Arc::new(Self {
            error: |path| StoreError::AccessDenied {
                path: path.to_string(),
                message: "explicit deny in IAM policy".to_string(),
            },
        })
    }

    pub fn throttled() -> Arc<Self> {
        Arc::new(Self {
            error: |path| StoreError::Throttled {
                path: path.to_string(),
                message: "rate exceeded".to_string(),
            },
        })
    }
}

#[async_trait]
impl ParameterStore for FailingStore {
    async fn get_parameter(
        &self,
        path: &str,
        _region: Option<&str>,
        _decrypt: bool,
    ) -> StoreResult<Option<String>> {
        Err((self.error)(path))
    }
}
