//! Template rendering.
//!
//! A [`Renderer`] wraps a minijinja [`Environment`] with the crate's helper
//! filters and exactly one custom function, `ssm`, closed over a
//! [`Resolver`]:
//!
//! ```jinja2
//! password: {{ ssm("db.password") }}
//! greeting: {{ ssm("greeting", "default=world") }}
//! ```
//!
//! Rendering is a linear walk over the template body; every `ssm` call
//! blocks the render until its store lookup returns. A failing directive
//! aborts the whole render and the typed [`ResolveError`] is preserved
//! across the engine boundary, so callers can match on the real cause
//! instead of a stringified template error.

pub mod filters;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use minijinja::value::Rest;
use minijinja::{context, Environment, ErrorKind};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task;

use crate::error::{Error, Result};
use crate::resolver::{ResolveError, Resolver};

/// Template renderer bound to one resolution context.
pub struct Renderer {
    env: Environment<'static>,
    /// Typed resolution failure of the current render, if any. The `ssm`
    /// binding records it here because minijinja errors only carry strings.
    failure: Arc<Mutex<Option<ResolveError>>>,
}

impl Renderer {
    /// Build an environment with the builtin filter library, the crate's
    /// helper filters, and the `ssm` directive.
    ///
    /// Must be called from within a tokio multi-thread runtime: the `ssm`
    /// binding bridges minijinja's synchronous function interface to the
    /// async store via `block_in_place` on the captured handle.
    pub fn new(resolver: Arc<Resolver>) -> Self {
        let mut env = Environment::new();
        filters::register_filters(&mut env);

        let failure = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&failure);
        let handle = Handle::current();

        env.add_function(
            "ssm",
            move |name: String, options: Rest<String>| -> std::result::Result<String, minijinja::Error> {
                let result = task::block_in_place(|| {
                    handle.block_on(resolver.resolve(&name, &options))
                });
                result.map_err(|err| {
                    let message = err.to_string();
                    *slot.lock() = Some(err);
                    minijinja::Error::new(ErrorKind::InvalidOperation, message)
                })
            },
        );

        Self { env, failure }
    }

    /// Render a template from a string.
    ///
    /// `name` is used in error messages only. Template syntax errors abort
    /// before any directive executes.
    pub fn render_str(&self, name: &str, source: &str) -> Result<String> {
        self.failure.lock().take();

        let template = self
            .env
            .template_from_named_str(name, source)
            .map_err(|err| Error::TemplateParse {
                path: name.to_string(),
                message: error_chain(&err),
            })?;

        match template.render(context! {}) {
            Ok(rendered) => Ok(rendered),
            Err(err) => {
                if let Some(resolve_err) = self.failure.lock().take() {
                    return Err(resolve_err.into());
                }
                Err(Error::TemplateRender {
                    path: name.to_string(),
                    message: error_chain(&err),
                })
            }
        }
    }

    /// Load a template file and render it.
    pub fn render_path(&self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|err| Error::TemplateRead {
            path: path.to_path_buf(),
            source: err,
        })?;
        self.render_str(&path.display().to_string(), &source)
    }
}

/// Flatten a minijinja error and its source chain into one message.
fn error_chain(err: &minijinja::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}
