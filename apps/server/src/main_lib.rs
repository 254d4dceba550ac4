use std::sync::Arc;

use coinfolio_bitvavo::BitvavoClient;
use coinfolio_core::{BalanceSource, PortfolioTracker, PriceSource};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AccessGate, config::Config, events::EventBus, scheduler::RefreshScheduler,
    session::DashboardSession,
};

pub struct AppState {
    pub tracker: Arc<PortfolioTracker>,
    pub session: DashboardSession,
    pub event_bus: EventBus,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Builds the state around a Bitvavo client for both balances and prices.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = Arc::new(BitvavoClient::new(config.bitvavo.clone())?);
    if client.has_credentials() {
        tracing::info!("Bitvavo client ready at {}", client.base_url());
    } else {
        tracing::warn!("BITVAVO_API_KEY/BITVAVO_API_SECRET not set, balance fetches will fail");
    }
    build_state_with_sources(config, client.clone(), client)
}

pub fn build_state_with_sources(
    config: &Config,
    balance_source: Arc<dyn BalanceSource>,
    price_source: Arc<dyn PriceSource>,
) -> anyhow::Result<Arc<AppState>> {
    let event_bus = EventBus::new(256);

    let tracker = Arc::new(
        PortfolioTracker::new(balance_source, price_source, config.fiat_currency.clone())
            .with_event_sink(Arc::new(event_bus.clone())),
    );

    let gate = config.auth.as_ref().map(AccessGate::new).transpose()?;
    let scheduler = RefreshScheduler::new(tracker.clone(), config.refresh_interval);

    Ok(Arc::new(AppState {
        tracker,
        session: DashboardSession::new(gate, scheduler),
        event_bus,
    }))
}
