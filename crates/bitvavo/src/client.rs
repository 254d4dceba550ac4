//! HTTP client for the Bitvavo REST API.

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use coinfolio_core::{AssetBalance, PriceQuote};

use crate::config::{BitvavoConfig, Credentials};
use crate::errors::BitvavoError;
use crate::models::{BalanceEntry, TickerPrice};
use crate::retry::RetryPolicy;
use crate::signing::{
    create_signature, timestamp_millis, HEADER_ACCESS_KEY, HEADER_SIGNATURE, HEADER_TIMESTAMP,
    HEADER_WINDOW,
};

/// Read-only Bitvavo client.
///
/// Every request is signed when credentials are configured. `GET /balance`
/// refuses to go out without them.
#[derive(Debug, Clone)]
pub struct BitvavoClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
    access_window_ms: u64,
    retry: RetryPolicy,
}

impl BitvavoClient {
    pub fn new(config: BitvavoConfig) -> Result<Self, BitvavoError> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| BitvavoError::InvalidConfig(format!("api url '{base_url}': {e}")))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BitvavoError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
            access_window_ms: config.access_window_ms,
            retry: config.retry,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /balance`: every asset the account holds.
    pub async fn balance(&self) -> Result<Vec<AssetBalance>, BitvavoError> {
        if self.credentials.is_none() {
            return Err(BitvavoError::MissingCredentials);
        }
        let entries: Vec<BalanceEntry> = self
            .retry
            .run("balance", || self.signed_get("balance"))
            .await?;
        debug!("Fetched {} balance entries", entries.len());
        Ok(entries.into_iter().map(AssetBalance::from).collect())
    }

    /// `GET /ticker/price`: the latest price of every market.
    pub async fn ticker_prices(&self) -> Result<Vec<PriceQuote>, BitvavoError> {
        let tickers: Vec<TickerPrice> = self
            .retry
            .run("ticker/price", || self.signed_get("ticker/price"))
            .await?;
        debug!("Fetched {} ticker prices", tickers.len());
        Ok(tickers.into_iter().map(PriceQuote::from).collect())
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, BitvavoError> {
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| BitvavoError::InvalidConfig(format!("url '{raw}': {e}")))
    }

    async fn signed_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BitvavoError> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.client.get(url.clone());
        if let Some(credentials) = &self.credentials {
            let timestamp = timestamp_millis()?;
            request = request.headers(auth_headers(
                credentials,
                &timestamp,
                "GET",
                &url,
                "",
                self.access_window_ms,
            )?);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BitvavoError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| BitvavoError::InvalidResponse(e.to_string()))
    }
}

/// Path plus query as it goes into the signature, e.g. `/v2/balance`.
pub(crate) fn signing_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

pub(crate) fn auth_headers(
    credentials: &Credentials,
    timestamp: &str,
    method: &str,
    url: &Url,
    body: &str,
    access_window_ms: u64,
) -> Result<HeaderMap, BitvavoError> {
    let signature = create_signature(
        &credentials.api_secret,
        timestamp,
        method,
        &signing_path(url),
        body,
    )?;

    let mut headers = HeaderMap::new();
    for (name, value) in [
        (HEADER_ACCESS_KEY, credentials.api_key.clone()),
        (HEADER_SIGNATURE, signature),
        (HEADER_TIMESTAMP, timestamp.to_string()),
        (HEADER_WINDOW, access_window_ms.to_string()),
    ] {
        let value = HeaderValue::from_str(&value).map_err(|_| {
            BitvavoError::InvalidConfig(format!("invalid characters in {name} header"))
        })?;
        headers.insert(HeaderName::from_static(name), value);
    }
    Ok(headers)
}
