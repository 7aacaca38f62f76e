//! Error handling for the request form.
//!
//! Every failure a submission can hit is a [`FormError`]. The two kinds the
//! result region distinguishes are malformed params (caught before any network
//! traffic) and everything that goes wrong on the wire or while decoding the
//! reply.

use std::error::Error as _;
use thiserror::Error;

/// Main error type for the request form and its client.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Invalid JSON in params: {message}")]
    InvalidParams { message: String },

    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{}", describe_network(.source))]
    Network {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{source}")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shorthand for results carrying a [`FormError`].
pub type FormResult<T> = Result<T, FormError>;

impl FormError {
    /// Create a params error from the parser's message
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create an unknown method error
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            operation: operation.into(),
            source,
        }
    }

    /// Create an error for a response body that is not JSON
    pub fn invalid_response(source: serde_json::Error) -> Self {
        Self::InvalidResponse { source }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// True when the failure happened before anything was sent.
    pub fn is_params_error(&self) -> bool {
        matches!(self, FormError::InvalidParams { .. })
    }

    /// The text the result region shows for this failure.
    pub fn display_text(&self) -> String {
        match self {
            FormError::InvalidParams { .. } => self.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

/// reqwest's own message names the URL but not the cause, so a timeout and a
/// refused connection read the same. Append the innermost cause.
fn describe_network(err: &reqwest::Error) -> String {
    let mut message = err.to_string();

    let mut innermost = None;
    let mut cause = err.source();
    while let Some(next) = cause {
        innermost = Some(next);
        cause = next.source();
    }
    if let Some(inner) = innermost {
        let inner = inner.to_string();
        if !message.contains(&inner) {
            message = format!("{message}: {inner}");
        }
    }

    if err.is_timeout() && !message.contains("timed out") {
        message.push_str(" (timed out)");
    }
    message
}
