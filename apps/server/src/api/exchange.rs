//! Raw passthrough of what the exchange reports, without valuation.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use coinfolio_core::{AssetBalance, BalanceSource, PriceQuote, PriceSource};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_balance(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AssetBalance>>> {
    let balances = state.tracker.balance_source().fetch_balances().await?;
    Ok(Json(balances))
}

async fn get_prices(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PriceQuote>>> {
    let quotes = state.tracker.price_source().fetch_prices().await?;
    Ok(Json(quotes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exchange/balance", get(get_balance))
        .route("/exchange/prices", get(get_prices))
}
