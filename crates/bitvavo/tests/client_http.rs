//! Client tests against an in-process fake of the exchange API.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use coinfolio_bitvavo::signing::create_signature;
use coinfolio_bitvavo::{BitvavoClient, BitvavoConfig, BitvavoError, Credentials, RetryPolicy};
use coinfolio_core::{AssetBalance, BalanceSource, PriceQuote, PriceSource};

const API_KEY: &str = "test-key";
const API_SECRET: &str = "bitvavo-test-secret";

#[derive(Clone, Default)]
struct FakeExchange {
    ticker_calls: Arc<AtomicUsize>,
    ticker_failures: usize,
}

fn signature_is_valid(headers: &HeaderMap, path: &str) -> bool {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let (Some(key), Some(signature), Some(timestamp), Some(window)) = (
        header("bitvavo-access-key"),
        header("bitvavo-access-signature"),
        header("bitvavo-access-timestamp"),
        header("bitvavo-access-window"),
    ) else {
        return false;
    };
    let expected = create_signature(API_SECRET, &timestamp, "GET", path, "").unwrap();
    key == API_KEY && signature == expected && window == "10000"
}

async fn balance(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !signature_is_valid(&headers, "/v2/balance") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"errorCode": 309, "error": "The signature is invalid."})),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            {"symbol": "EUR", "available": "1000", "inOrder": "0"},
            {"symbol": "BTC", "available": "0.5", "inOrder": "0.1"},
        ])),
    )
}

async fn ticker_price(State(fake): State<FakeExchange>) -> (StatusCode, Json<Value>) {
    let call = fake.ticker_calls.fetch_add(1, Ordering::SeqCst);
    if call < fake.ticker_failures {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"errorCode": 101, "error": "Unknown error."})),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            {"market": "BTC-EUR", "price": "40000"},
            {"market": "HALTED-EUR"},
        ])),
    )
}

async fn spawn_fake(fake: FakeExchange) -> SocketAddr {
    let app = Router::new()
        .route("/v2/balance", get(balance))
        .route("/v2/ticker/price", get(ticker_price))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr) -> BitvavoConfig {
    BitvavoConfig::default()
        .with_api_url(format!("http://{addr}/v2"))
        .with_retry(RetryPolicy::new(2, Duration::from_millis(10)))
}

fn credentials(secret: &str) -> Credentials {
    Credentials {
        api_key: API_KEY.to_string(),
        api_secret: secret.to_string(),
    }
}

#[tokio::test]
async fn fetches_signed_balances() {
    let addr = spawn_fake(FakeExchange::default()).await;
    let client =
        BitvavoClient::new(config(addr).with_credentials(credentials(API_SECRET))).unwrap();

    let balances = client.fetch_balances().await.unwrap();
    assert_eq!(
        balances,
        vec![
            AssetBalance::new("EUR", "1000", "0"),
            AssetBalance::new("BTC", "0.5", "0.1"),
        ]
    );
}

#[tokio::test]
async fn wrong_secret_is_a_permanent_failure() {
    let addr = spawn_fake(FakeExchange::default()).await;
    let client =
        BitvavoClient::new(config(addr).with_credentials(credentials("wrong-secret"))).unwrap();

    match client.balance().await {
        Err(BitvavoError::AuthenticationFailed { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "The signature is invalid. (code 309)");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let err = client.fetch_balances().await.unwrap_err();
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn prices_do_not_need_credentials() {
    let addr = spawn_fake(FakeExchange::default()).await;
    let client = BitvavoClient::new(config(addr)).unwrap();

    let quotes = client.fetch_prices().await.unwrap();
    assert_eq!(
        quotes,
        vec![
            PriceQuote::new("BTC-EUR", "40000"),
            PriceQuote::new("HALTED-EUR", ""),
        ]
    );
}

#[tokio::test]
async fn retries_unavailable_exchange() {
    let fake = FakeExchange {
        ticker_failures: 2,
        ..FakeExchange::default()
    };
    let calls = fake.ticker_calls.clone();
    let addr = spawn_fake(fake).await;
    let client = BitvavoClient::new(config(addr)).unwrap();

    let quotes = client.ticker_prices().await.unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn reports_exhausted_retries() {
    let fake = FakeExchange {
        ticker_failures: usize::MAX,
        ..FakeExchange::default()
    };
    let calls = fake.ticker_calls.clone();
    let addr = spawn_fake(fake).await;
    let client = BitvavoClient::new(config(addr)).unwrap();

    let err = client.fetch_prices().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(
        err.to_string(),
        "Data source failed: prices fetch failed: HTTP 503: Unknown error. (code 101)"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn missing_credentials_is_reported_as_unconfigured() {
    let addr = spawn_fake(FakeExchange::default()).await;
    let client = BitvavoClient::new(config(addr)).unwrap();

    let coinfolio_core::Error::Source(source) = client.fetch_balances().await.unwrap_err();
    assert!(source.unconfigured);
    assert!(!source.retryable);
}
