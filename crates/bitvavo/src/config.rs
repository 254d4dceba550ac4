//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Public REST endpoint, including the API version segment.
pub const DEFAULT_API_URL: &str = "https://api.bitvavo.com/v2";

/// Milliseconds a signed request stays valid after its timestamp.
pub const DEFAULT_ACCESS_WINDOW_MS: u64 = 10_000;

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API key pair. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Returns `None` unless both halves are non-empty.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Option<Self> {
        let api_key = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())?;
        let api_secret = api_secret
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;
        Some(Self {
            api_key,
            api_secret,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BitvavoConfig {
    pub api_url: String,
    pub credentials: Option<Credentials>,
    pub access_window_ms: u64,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for BitvavoConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials: None,
            access_window_ms: DEFAULT_ACCESS_WINDOW_MS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl BitvavoConfig {
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
