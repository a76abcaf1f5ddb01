//! Parameter store abstraction.
//!
//! This module defines the interface the resolver uses to fetch parameter
//! values, together with the store-level error types. The only production
//! backend is [`SsmStore`], which talks to AWS SSM Parameter Store; tests
//! supply in-memory implementations of [`ParameterStore`].

pub mod ssm;

pub use ssm::SsmStore;

use async_trait::async_trait;
use thiserror::Error;

/// Result type for parameter store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while talking to the parameter store.
///
/// Absence of a parameter is not an error at this layer: lookups return
/// `Ok(None)` and the resolver applies the default/required policy.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store session could not be established (bad profile, missing
    /// credentials). Fatal before any rendering starts.
    #[error("Failed to initialize AWS session: {0}")]
    Session(String),

    /// The caller is not allowed to read the parameter.
    #[error("Access denied for parameter '{path}': {message}")]
    AccessDenied {
        /// The full parameter path
        path: String,
        /// Error message from the store
        message: String,
    },

    /// The store throttled the request.
    #[error("Rate limited while fetching parameter '{path}': {message}")]
    Throttled {
        /// The full parameter path
        path: String,
        /// Error message from the store
        message: String,
    },

    /// The request timed out.
    #[error("Request for parameter '{path}' timed out")]
    Timeout {
        /// The full parameter path
        path: String,
    },

    /// The request never reached the store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store returned an error not covered by the other variants.
    #[error("Parameter store error for '{path}': {message}")]
    Backend {
        /// The full parameter path
        path: String,
        /// Error message from the store
        message: String,
    },
}

/// Trait for parameter store backends.
///
/// One implementation is bound to one authentication session for its whole
/// lifetime. A `region` override scopes a single call to another region;
/// how that is realized (for AWS: a fresh client built from the shared
/// session config) is up to the backend.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch a parameter value by its full path.
    ///
    /// Returns `Ok(Some(value))` when the parameter exists, `Ok(None)` when
    /// the store reports it absent, and an error for any other failure.
    /// `decrypt` requests that secure values be decrypted by the store.
    async fn get_parameter(
        &self,
        path: &str,
        region: Option<&str>,
        decrypt: bool,
    ) -> StoreResult<Option<String>>;

    /// Backend name for logging.
    fn name(&self) -> &'static str {
        "parameter store"
    }
}
