//! Ties the password gate to the refresh poller.
//!
//! Logging in is what turns polling on: the first successful login starts
//! the poller, later logins queue one extra refresh. Without a configured
//! password the session is open from boot.

use axum::http::HeaderMap;

use crate::auth::{AccessGate, AccessToken, AuthError};
use crate::scheduler::{RefreshScheduler, RefreshTrigger};

pub struct DashboardSession {
    gate: Option<AccessGate>,
    scheduler: RefreshScheduler,
}

impl DashboardSession {
    pub fn new(gate: Option<AccessGate>, scheduler: RefreshScheduler) -> Self {
        Self { gate, scheduler }
    }

    pub fn requires_password(&self) -> bool {
        self.gate.is_some()
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Starts polling right away when no password protects the API.
    pub async fn open_if_unprotected(&self) -> Option<RefreshTrigger> {
        if self.gate.is_some() {
            return None;
        }
        Some(self.scheduler.on_authenticated().await)
    }

    /// Verifies the password, then starts or nudges the poller.
    pub async fn login(
        &self,
        password: &str,
    ) -> Result<(AccessToken, RefreshTrigger), AuthError> {
        let gate = self.gate.as_ref().ok_or(AuthError::NotConfigured)?;
        let token = gate.authenticate(password)?;
        let trigger = self.scheduler.on_authenticated().await;
        tracing::info!("Login succeeded ({:?})", trigger);
        Ok((token, trigger))
    }

    /// An open session admits every request.
    pub fn admit(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        match &self.gate {
            Some(gate) => gate.admit(headers),
            None => Ok(()),
        }
    }

    /// Stops polling. Returns `false` if nothing was running.
    pub async fn close(&self) -> bool {
        self.scheduler.shutdown().await
    }
}
