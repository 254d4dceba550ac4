//! Error types and retry classification for the Bitvavo client.
//!
//! This module provides:
//! - [`BitvavoError`]: The main error enum for all exchange operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use coinfolio_core::errors::{SourceError, SourceKind};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Longest upstream body excerpt kept in an error message.
const MAX_BODY_EXCERPT: usize = 200;

/// Errors that can occur while talking to Bitvavo.
///
/// Each variant is classified into a [`RetryClass`] via
/// [`retry_class`](Self::retry_class).
#[derive(Error, Debug)]
pub enum BitvavoError {
    /// No API key/secret configured for an endpoint that needs them.
    #[error("API credentials not configured")]
    MissingCredentials,

    /// The client configuration is unusable (bad URL, bad header value).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request could not be signed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The exchange rate limited the request (HTTP 429).
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// The exchange rejected the credentials or signature (HTTP 401/403).
    #[error("Authentication failed (HTTP {status}): {message}")]
    AuthenticationFailed { status: u16, message: String },

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A transport error occurred while communicating with the exchange.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl BitvavoError {
    /// Builds the error for a non-success HTTP response.
    ///
    /// Bitvavo reports failures as `{"errorCode": 105, "error": "..."}`;
    /// when the body has another shape an excerpt of it is kept instead.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                error: Some(error),
                error_code: Some(code),
            }) => format!("{error} (code {code})"),
            Ok(ErrorResponse {
                error: Some(error), ..
            }) => error,
            _ => body.trim().chars().take(MAX_BODY_EXCERPT).collect(),
        };

        match status {
            429 => BitvavoError::RateLimited { message },
            401 | 403 => BitvavoError::AuthenticationFailed { status, message },
            _ => BitvavoError::Http { status, message },
        }
    }

    /// Upstream HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BitvavoError::RateLimited { .. } => Some(429),
            BitvavoError::AuthenticationFailed { status, .. } => Some(*status),
            BitvavoError::Http { status, .. } => Some(*status),
            BitvavoError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinfolio_bitvavo::{BitvavoError, RetryClass};
    ///
    /// let error = BitvavoError::from_status(429, "");
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = BitvavoError::from_status(403, "");
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            BitvavoError::RateLimited { .. } => RetryClass::WithBackoff,
            BitvavoError::Http { status, .. } if *status >= 500 => RetryClass::WithBackoff,
            BitvavoError::Network(e) if !(e.is_builder() || e.is_decode()) => {
                RetryClass::WithBackoff
            }
            _ => RetryClass::Never,
        }
    }

    /// Converts into the core's transport-agnostic source failure.
    pub fn into_source_error(self, kind: SourceKind) -> SourceError {
        if matches!(self, BitvavoError::MissingCredentials) {
            return SourceError::unconfigured(kind, self.to_string());
        }
        let status = self.status();
        let retryable = self.retry_class() == RetryClass::WithBackoff;
        let mut error = SourceError::new(kind, self.to_string());
        if let Some(status) = status {
            error = error.with_status(status);
        }
        if !retryable {
            error = error.permanent();
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exchange_error_body() {
        let body = r#"{"errorCode":105,"error":"Your account is temporarily blocked."}"#;
        let error = BitvavoError::from_status(403, body);
        assert_eq!(
            error.to_string(),
            "Authentication failed (HTTP 403): Your account is temporarily blocked. (code 105)"
        );
        assert_eq!(error.status(), Some(403));
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn keeps_excerpt_of_unstructured_body() {
        let body = format!("  <html>{}</html>", "x".repeat(500));
        let error = BitvavoError::from_status(502, &body);
        match &error {
            BitvavoError::Http { status, message } => {
                assert_eq!(*status, 502);
                assert!(message.starts_with("<html>"));
                assert_eq!(message.chars().count(), MAX_BODY_EXCERPT);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn classifies_statuses() {
        assert!(matches!(
            BitvavoError::from_status(429, r#"{"error":"slow down"}"#),
            BitvavoError::RateLimited { ref message } if message == "slow down"
        ));
        assert_eq!(
            BitvavoError::from_status(500, "").retry_class(),
            RetryClass::WithBackoff
        );
        assert_eq!(
            BitvavoError::from_status(404, "").retry_class(),
            RetryClass::Never
        );
        assert_eq!(
            BitvavoError::MissingCredentials.retry_class(),
            RetryClass::Never
        );
    }

    #[test]
    fn converts_into_source_error() {
        let source = BitvavoError::from_status(503, "down").into_source_error(SourceKind::Prices);
        assert_eq!(source.kind, SourceKind::Prices);
        assert_eq!(source.status, Some(503));
        assert!(source.retryable);
        assert_eq!(source.message, "HTTP 503: down");

        let source = BitvavoError::MissingCredentials.into_source_error(SourceKind::Balances);
        assert_eq!(source.status, None);
        assert!(!source.retryable);
        assert!(source.unconfigured);
        assert_eq!(source.message, "API credentials not configured");

        let source = BitvavoError::from_status(401, "").into_source_error(SourceKind::Balances);
        assert!(!source.unconfigured);
    }
}
