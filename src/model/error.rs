//! Error types for holocron.
//!
//! Two tiers, following the same split between recoverable and fatal failures:
//!
//! - [`FetchError`] - a single remote call failed. **Non-fatal**: controllers
//!   catch it at their boundary, store it in their state and the view renders
//!   it with a retry hint. It never propagates past a controller.
//! - [`AppError`] - startup or terminal failures. **Fatal**: propagates to
//!   `main`, which restores the terminal and exits non-zero.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Failure of one remote catalog request.
///
/// `Display` is the human-readable message shown in the UI, so every variant
/// reads as a sentence fragment a user can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, aborted body, ...
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Request failed with HTTP status {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The body was not JSON or did not have the expected envelope.
    #[error("Unexpected response from server: {0}")]
    Malformed(String),

    /// The request URL could not be built (bad base address or locator).
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// HTTP status code, when the failure was a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else if err.is_builder() {
            FetchError::InvalidUrl(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::InvalidUrl(err.to_string())
    }
}

/// Top-level application error.
///
/// Returned from startup and from the terminal loop. Everything here is fatal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("Failed to initialize API client: {0}")]
    Client(#[from] FetchError),

    /// Log file could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// The async runtime for network requests could not start.
    #[error("Failed to start fetch runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Terminal setup, rendering or event reading failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_names_the_code() {
        let err = FetchError::Status { status: 404 };
        assert_eq!(err.to_string(), "Request failed with HTTP status 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn json_error_converts_to_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FetchError = json_err.into();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn url_error_converts_to_invalid_url() {
        let parse_err = url::Url::parse("::nope").unwrap_err();
        let err: FetchError = parse_err.into();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn app_error_wraps_fetch_error() {
        let app: AppError = FetchError::InvalidUrl("ftp://x".into()).into();
        assert!(app.to_string().starts_with("Failed to initialize API client"));
    }
}
