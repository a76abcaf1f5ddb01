//! # ssmtpl - Template Rendering from AWS SSM Parameter Store
//!
//! ssmtpl renders text templates whose placeholders are resolved against
//! AWS SSM Parameter Store at render time. It is used to materialize
//! configuration files (deployment manifests, values files) whose secret or
//! environment-specific values live outside the template source.
//!
//! ## Core Concepts
//!
//! - **Lookup directive**: the template-embedded `ssm(...)` call that
//!   requests a parameter value
//! - **Options**: per-call `key=value` tokens (`default`, `prefix`,
//!   `region`, `required`) controlling fallback and routing
//! - **Prefix**: a path segment prepended to a parameter name to form its
//!   full store path
//! - **Required policy**: whether absence of a parameter is a fatal error
//!   or resolved to a fallback (the default policy is required)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      CLI Interface                       │
//! │                (clap-based flag parsing)                 │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Template Engine                         │
//! │        (Jinja2-compat via minijinja + `ssm` fn)          │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Resolver                            │
//! │     (option grammar, prefix logic, required policy)      │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Parameter Store                         │
//! │        (AWS SSM via aws-config / aws-sdk-ssm)            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ssmtpl::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> ssmtpl::Result<()> {
//!     let store = SsmStore::connect(Some("staging")).await?;
//!     let resolver = Arc::new(Resolver::new(Arc::new(store), "/staging/"));
//!     let renderer = Renderer::new(resolver);
//!
//!     let rendered = renderer.render_str(
//!         "inline",
//!         r#"password: {{ ssm("db.password") }}"#,
//!     )?;
//!     println!("{rendered}");
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod options;
pub mod resolver;
pub mod store;
pub mod template;

pub use error::{Error, Result};
pub use options::{LookupOptions, OptionError};
pub use resolver::{ResolveError, Resolver};
pub use store::{ParameterStore, SsmStore, StoreError, StoreResult};
pub use template::Renderer;

/// Convenient re-exports of commonly used types and traits.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::options::LookupOptions;
    pub use crate::resolver::{ResolveError, Resolver};
    pub use crate::store::{ParameterStore, SsmStore, StoreError};
    pub use crate::template::Renderer;
}
