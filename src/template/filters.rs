//! Generic helper filters for templates.
//!
//! These supplement minijinja's builtin filter library with the encoding,
//! checksum, serialization and indentation helpers that configuration
//! templates usually want:
//!
//! - `b64encode` / `b64decode`: Base64 encoding
//! - `sha256`: SHA-256 hex digest
//! - `to_yaml` / `from_yaml`: YAML serialization
//! - `quote` / `squote`: wrap a value in double/single quotes
//! - `indent` / `nindent`: indent every line of a block
//!
//! # Examples
//!
//! ```jinja2
//! password: {{ ssm("db.password") | b64encode }}
//! config: {{ settings | to_yaml | nindent(2) }}
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use minijinja::{Environment, ErrorKind, Value};
use sha2::{Digest, Sha256};

/// Register all helper filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("b64encode", b64encode);
    env.add_filter("b64decode", b64decode);
    env.add_filter("sha256", sha256_filter);
    env.add_filter("to_yaml", to_yaml);
    env.add_filter("from_yaml", from_yaml);
    env.add_filter("quote", quote_filter);
    env.add_filter("squote", squote_filter);
    env.add_filter("indent", indent);
    env.add_filter("nindent", nindent);
}

fn b64encode(input: String) -> String {
    STANDARD.encode(input.as_bytes())
}

fn b64decode(input: String) -> Result<String, minijinja::Error> {
    let bytes = STANDARD.decode(&input).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid base64 input: {err}"),
        )
    })?;
    String::from_utf8(bytes).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("decoded base64 is not valid UTF-8: {err}"),
        )
    })
}

fn sha256_filter(input: String) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn to_yaml(value: Value) -> Result<String, minijinja::Error> {
    serde_yaml::to_string(&value).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot serialize value to YAML: {err}"),
        )
    })
}

fn from_yaml(input: String) -> Result<Value, minijinja::Error> {
    let parsed: serde_json::Value = serde_yaml::from_str(&input).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot parse YAML: {err}"),
        )
    })?;
    Ok(Value::from_serialize(&parsed))
}

fn quote_filter(input: String) -> String {
    format!("\"{input}\"")
}

fn squote_filter(input: String) -> String {
    format!("'{input}'")
}

/// Indent every line of a block by `width` spaces.
fn indent(input: String, width: usize) -> String {
    let pad = " ".repeat(width);
    input
        .lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Like `indent`, but with a leading newline. Useful after a YAML key.
fn nindent(input: String, width: usize) -> String {
    format!("\n{}", indent(input, width))
}
