//! Option grammar for lookup directives.
//!
//! Every `ssm` directive accepts a variadic list of `key=value` tokens after
//! the parameter name:
//!
//! ```jinja2
//! {{ ssm("db.password", "prefix=/prod/", "region=eu-west-1") }}
//! {{ ssm("feature.flag", "default=off", "required=false") }}
//! ```
//!
//! Tokens are parsed into a [`LookupOptions`] record. A token must contain
//! exactly one `=`; anything else is rejected with an error naming the
//! offending token. Keys outside the recognized set are accepted and
//! ignored, so templates stay forward-compatible with newer options.

use thiserror::Error;

/// Option keys understood by the `ssm` directive.
pub const RECOGNIZED_KEYS: &[&str] = &["default", "prefix", "region", "required"];

/// Errors that can occur while parsing directive options.
#[derive(Error, Debug)]
pub enum OptionError {
    /// A token did not split into exactly one `key=value` pair.
    #[error("Invalid option '{token}'. Valid options: {valid}", valid = RECOGNIZED_KEYS.join(", "))]
    Malformed {
        /// The offending token
        token: String,
    },
}

/// Parsed options of a single lookup directive.
///
/// `required` defaults to `true`: absence of a parameter in the store is an
/// error unless the directive explicitly opts out or supplies a default.
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Value returned when the parameter is absent from the store.
    pub default: Option<String>,

    /// Overrides the caller-supplied default prefix for this lookup only.
    pub prefix: Option<String>,

    /// Overrides the ambient region for this lookup only.
    pub region: Option<String>,

    /// Whether absence of the parameter is an error.
    pub required: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            default: None,
            prefix: None,
            region: None,
            required: true,
        }
    }
}

impl LookupOptions {
    /// Parse an ordered sequence of raw `key=value` tokens.
    ///
    /// Only the literal value `"true"` enables the required policy; any
    /// other value for `required` disables it. Unrecognized keys are
    /// ignored.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, OptionError> {
        let mut options = Self::default();

        for token in tokens {
            let token = token.as_ref();
            let mut parts = token.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => (key, value),
                _ => {
                    return Err(OptionError::Malformed {
                        token: token.to_string(),
                    })
                }
            };

            match key {
                "default" => options.default = Some(value.to_string()),
                "prefix" => options.prefix = Some(value.to_string()),
                "region" => options.region = Some(value.to_string()),
                "required" => options.required = value == "true",
                other => {
                    tracing::debug!(key = other, "ignoring unrecognized lookup option");
                }
            }
        }

        Ok(options)
    }
}
