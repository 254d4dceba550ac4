#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use coinfolio_core::errors::{Result, SourceError, SourceKind};
use coinfolio_core::{AssetBalance, BalanceSource, PriceQuote, PriceSource};
use coinfolio_server::{api::app_router, build_state_with_sources, config::Config, AppState};
use rand::{rngs::OsRng, RngCore};
use tower::ServiceExt;

/// In-memory exchange whose feeds can be switched off.
#[derive(Default)]
pub struct StubExchange {
    balances: Mutex<Vec<AssetBalance>>,
    quotes: Mutex<Vec<PriceQuote>>,
    fail_prices: AtomicBool,
    missing_credentials: AtomicBool,
    balance_calls: AtomicUsize,
}

impl StubExchange {
    pub fn with_data(balances: Vec<AssetBalance>, quotes: Vec<PriceQuote>) -> Arc<Self> {
        Arc::new(Self {
            balances: Mutex::new(balances),
            quotes: Mutex::new(quotes),
            ..Default::default()
        })
    }

    /// One EUR cash balance and half a bitcoin priced at 40000.
    pub fn sample() -> Arc<Self> {
        Self::with_data(
            vec![
                AssetBalance::new("EUR", "1000", "0"),
                AssetBalance::new("BTC", "0.5", "0.1"),
            ],
            vec![PriceQuote::new("BTC-EUR", "40000")],
        )
    }

    pub fn set_fail_prices(&self, fail: bool) {
        self.fail_prices.store(fail, Ordering::SeqCst);
    }

    /// Makes balance fetches fail the way an account without API keys does.
    pub fn set_missing_credentials(&self, missing: bool) {
        self.missing_credentials.store(missing, Ordering::SeqCst);
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceSource for StubExchange {
    async fn fetch_balances(&self) -> Result<Vec<AssetBalance>> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.missing_credentials.load(Ordering::SeqCst) {
            return Err(SourceError::unconfigured(
                SourceKind::Balances,
                "API credentials not configured",
            )
            .into());
        }
        Ok(self.balances.lock().unwrap().clone())
    }
}

#[async_trait]
impl PriceSource for StubExchange {
    async fn fetch_prices(&self) -> Result<Vec<PriceQuote>> {
        if self.fail_prices.load(Ordering::SeqCst) {
            return Err(SourceError::new(SourceKind::Prices, "HTTP 503: maintenance")
                .with_status(503)
                .into());
        }
        Ok(self.quotes.lock().unwrap().clone())
    }
}

pub fn config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Argon2 hash and base64 signing key for a password-protected server.
pub fn auth_vars(password: &str) -> (String, String) {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string();

    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);
    (password_hash, BASE64.encode(secret_bytes))
}

pub fn build_app(config: &Config, exchange: Arc<StubExchange>) -> (Arc<AppState>, Router) {
    let state = build_state_with_sources(config, exchange.clone(), exchange).unwrap();
    let router = app_router(state.clone(), config);
    (state, router)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
