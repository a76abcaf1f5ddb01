//! Error types for ssmtpl.
//!
//! The library keeps one error enum per layer (option grammar, parameter
//! store, resolver) and folds them into this crate-level [`Error`] at the
//! rendering boundary, so callers can still match on the typed cause of a
//! failed render.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::ResolveError;
use crate::store::StoreError;

/// Result type alias for ssmtpl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ssmtpl.
#[derive(Error, Debug)]
pub enum Error {
    /// The template body itself failed to parse. Surfaced before any
    /// directive executes.
    #[error("Failed to parse template '{path}': {message}")]
    TemplateParse {
        /// Template path or name
        path: String,
        /// Error message from the template engine
        message: String,
    },

    /// The template engine failed while rendering, for a reason other than
    /// a parameter resolution failure.
    #[error("Failed to render template '{path}': {message}")]
    TemplateRender {
        /// Template path or name
        path: String,
        /// Error message from the template engine
        message: String,
    },

    /// A lookup directive failed to resolve a parameter.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The parameter store session could not be established.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A template file could not be read.
    #[error("Failed to read template '{path}': {source}")]
    TemplateRead {
        /// Path to the template file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A rendered file could not be written.
    #[error("Failed to write rendered output '{path}': {source}")]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}
