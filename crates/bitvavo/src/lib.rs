//! Coinfolio Bitvavo - REST client for the Bitvavo exchange.
//!
//! This crate fetches account balances and ticker prices from Bitvavo and
//! exposes them to the core through [`BalanceSource`] and [`PriceSource`].
//!
//! # Overview
//!
//! - [`BitvavoClient`] signs requests with the account's API secret
//! - [`RetryPolicy`] retries transient failures with exponential backoff
//! - [`BitvavoError`] classifies failures into a [`RetryClass`]
//!
//! [`BalanceSource`]: coinfolio_core::BalanceSource
//! [`PriceSource`]: coinfolio_core::PriceSource

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod retry;
pub mod signing;

mod provider;

pub use client::BitvavoClient;
pub use config::{BitvavoConfig, Credentials, DEFAULT_ACCESS_WINDOW_MS, DEFAULT_API_URL};
pub use errors::{BitvavoError, RetryClass};
pub use retry::RetryPolicy;
