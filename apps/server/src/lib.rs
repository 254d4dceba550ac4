pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
mod main_lib;
pub mod scheduler;
pub mod session;

pub use main_lib::{build_state, build_state_with_sources, init_tracing, AppState};
