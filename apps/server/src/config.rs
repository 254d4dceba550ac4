use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Context};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use coinfolio_bitvavo::{BitvavoConfig, Credentials, RetryPolicy};
use coinfolio_core::constants::{DEFAULT_FIAT_CURRENCY, DEFAULT_REFRESH_INTERVAL_SECS};

use crate::auth::AuthConfig;

const MIN_SIGNING_KEY_LEN: usize = 32;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    pub fiat_currency: String,
    pub refresh_interval: Duration,
    pub auth: Option<AuthConfig>,
    pub bitvavo: BitvavoConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_addr: SocketAddr = var("CF_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CF_LISTEN_ADDR")?;
        let cors_allow = var("CF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 =
            parse_or("CF_REQUEST_TIMEOUT_MS", var("CF_REQUEST_TIMEOUT_MS"), 30_000)?;
        let static_dir = var("CF_STATIC_DIR").unwrap_or_else(|| "dist".into());
        let fiat_currency = var("CF_FIAT_CURRENCY")
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| DEFAULT_FIAT_CURRENCY.to_string());
        let refresh_secs: u64 = parse_or(
            "CF_REFRESH_INTERVAL_SECS",
            var("CF_REFRESH_INTERVAL_SECS"),
            DEFAULT_REFRESH_INTERVAL_SECS,
        )?;

        let auth = match var("CF_AUTH_PASSWORD_HASH") {
            Some(password_hash) => {
                let raw_secret = var("CF_SECRET_KEY").ok_or_else(|| {
                    anyhow!("CF_SECRET_KEY is required when CF_AUTH_PASSWORD_HASH is set")
                })?;
                let ttl_secs: u64 =
                    parse_or("CF_ACCESS_TOKEN_TTL_SECS", var("CF_ACCESS_TOKEN_TTL_SECS"), 3600)?;
                Some(AuthConfig {
                    password_hash,
                    signing_key: decode_signing_key(&raw_secret)?,
                    access_token_ttl: Duration::from_secs(ttl_secs),
                })
            }
            None => None,
        };

        let defaults = BitvavoConfig::default();
        let defaults_retry = RetryPolicy::default();
        let bitvavo = BitvavoConfig {
            api_url: var("BITVAVO_API_URL").unwrap_or(defaults.api_url),
            credentials: Credentials::from_parts(var("BITVAVO_API_KEY"), var("BITVAVO_API_SECRET")),
            access_window_ms: parse_or(
                "BITVAVO_ACCESS_WINDOW",
                var("BITVAVO_ACCESS_WINDOW"),
                defaults.access_window_ms,
            )?,
            request_timeout: Duration::from_millis(timeout_ms),
            retry: RetryPolicy::new(
                parse_or(
                    "BITVAVO_MAX_RETRIES",
                    var("BITVAVO_MAX_RETRIES"),
                    defaults_retry.max_retries,
                )?,
                Duration::from_millis(parse_or(
                    "BITVAVO_RETRY_DELAY_MS",
                    var("BITVAVO_RETRY_DELAY_MS"),
                    defaults_retry.initial_delay.as_millis() as u64,
                )?),
            ),
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            fiat_currency,
            refresh_interval: Duration::from_secs(refresh_secs),
            auth,
            bitvavo,
        })
    }
}

/// `CF_SECRET_KEY` is standard base64 of at least 32 random bytes.
fn decode_signing_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let key = BASE64
        .decode(raw)
        .context("CF_SECRET_KEY must be base64 encoded")?;
    if key.len() < MIN_SIGNING_KEY_LEN {
        bail!(
            "CF_SECRET_KEY must decode to at least {MIN_SIGNING_KEY_LEN} bytes, got {}",
            key.len()
        );
    }
    Ok(key)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(value),
            Err(e) => bail!("Invalid {key} '{raw}': {e}"),
        },
        None => Ok(default),
    }
}
