//! Core error types for the Coinfolio application.
//!
//! Exchange-specific errors (HTTP, signing, decoding) are converted to
//! [`SourceError`] by the exchange crate so this type stays transport-agnostic.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Data source failed: {0}")]
    Source(#[from] SourceError),
}

impl Error {
    /// Whether the caller may try the same operation again later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Source(e) => e.retryable,
        }
    }
}

/// Which collaborator a fetch failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Balances,
    Prices,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Balances => write!(f, "balances"),
            SourceKind::Prices => write!(f, "prices"),
        }
    }
}

/// Failure reported by a balance or price source.
///
/// `status` carries the upstream HTTP status when there was one.
/// `unconfigured` marks a source that cannot run until it is set up, such
/// as an exchange account without API credentials.
#[derive(Error, Debug, Clone)]
#[error("{kind} fetch failed: {message}")]
pub struct SourceError {
    pub kind: SourceKind,
    pub message: String,
    pub status: Option<u16>,
    pub retryable: bool,
    pub unconfigured: bool,
}

impl SourceError {
    pub fn new(kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retryable: true,
            unconfigured: false,
        }
    }

    /// The source is missing its setup; retrying cannot help.
    pub fn unconfigured(kind: SourceKind, message: impl Into<String>) -> Self {
        Self {
            retryable: false,
            unconfigured: true,
            ..Self::new(kind, message)
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn permanent(mut self) -> Self {
        self.retryable = false;
        self
    }
}
