//! Parameter resolution engine.
//!
//! A [`Resolver`] is constructed once per render invocation and owns the
//! shared store handle and the caller-supplied default prefix. Each lookup
//! directive runs [`Resolver::resolve`]: parse options, resolve the full
//! path, fetch from the store with decryption, then apply the
//! default/required policy.
//!
//! Decision table for a lookup:
//!
//! | store result | `default` | `required` | outcome |
//! |--------------|-----------|------------|---------|
//! | found        | any       | any        | stored value |
//! | absent       | set       | any        | the default |
//! | absent       | unset     | true       | [`ResolveError::MissingParameter`] |
//! | absent       | unset     | false      | empty string |
//! | store error  | any       | any        | error propagated unchanged |

use std::sync::Arc;
use thiserror::Error;

use crate::options::{LookupOptions, OptionError};
use crate::store::{ParameterStore, StoreError};

/// Errors that can occur while resolving a single lookup directive.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A directive option token was malformed.
    #[error(transparent)]
    Options(#[from] OptionError),

    /// The parameter is absent, required, and has no default.
    #[error("Missing required parameter '{path}'")]
    MissingParameter {
        /// The full path that was looked up
        path: String,
    },

    /// The directive was called without a parameter name.
    #[error("Parameter name must not be empty")]
    EmptyName,

    /// The store call failed for a reason other than absence.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolution context shared by every lookup in one render invocation.
pub struct Resolver {
    store: Arc<dyn ParameterStore>,
    default_prefix: String,
}

impl Resolver {
    /// Create a resolver over a store handle and a default prefix.
    ///
    /// The prefix is prepended verbatim; include any trailing delimiter in
    /// the prefix itself.
    pub fn new(store: Arc<dyn ParameterStore>, default_prefix: impl Into<String>) -> Self {
        Self {
            store,
            default_prefix: default_prefix.into(),
        }
    }

    /// Combine prefix and parameter name into the full store path.
    ///
    /// A `prefix` option replaces the default prefix entirely; the two are
    /// never combined.
    fn full_path(&self, options: &LookupOptions, name: &str) -> String {
        match &options.prefix {
            Some(prefix) => format!("{prefix}{name}"),
            None => format!("{}{name}", self.default_prefix),
        }
    }

    /// Resolve one lookup directive to its final string value.
    pub async fn resolve<S: AsRef<str>>(
        &self,
        name: &str,
        option_tokens: &[S],
    ) -> Result<String, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }

        let options = LookupOptions::parse(option_tokens)?;
        let path = self.full_path(&options, name);

        tracing::debug!(
            path = %path,
            region = options.region.as_deref(),
            store = self.store.name(),
            "resolving parameter"
        );

        let value = self
            .store
            .get_parameter(&path, options.region.as_deref(), true)
            .await?;

        match value {
            Some(value) => Ok(value),
            None => {
                if let Some(default) = options.default {
                    tracing::debug!(path = %path, "parameter absent, using default");
                    return Ok(default);
                }
                if options.required {
                    return Err(ResolveError::MissingParameter { path });
                }
                tracing::debug!(path = %path, "optional parameter absent, using empty string");
                Ok(String::new())
            }
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store.name())
            .field("default_prefix", &self.default_prefix)
            .finish()
    }
}
