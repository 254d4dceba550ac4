//! Password gate for the dashboard.
//!
//! One configured password unlocks the API. A successful login yields a
//! short-lived HS256 bearer token; the route middleware only checks that token.

use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::PasswordHashString;
use argon2::{Argon2, PasswordVerifier};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{
    decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;
use crate::main_lib::AppState;

const TOKEN_SUBJECT: &str = "coinfolio-dashboard";

#[derive(Clone)]
pub struct AuthConfig {
    pub password_hash: String,
    pub signing_key: Vec<u8>,
    pub access_token_ttl: Duration,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unauthorized")]
    MissingToken,
    #[error("Unauthorized")]
    InvalidToken,
    #[error("Invalid password")]
    WrongPassword,
    #[error("Authentication is not configured for this server")]
    NotConfigured,
    #[error("{0}")]
    Internal(String),
}

/// Bearer token handed out on login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

/// Checks the dashboard password and the tokens it issues.
pub struct AccessGate {
    password_hash: PasswordHashString,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AccessGate {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let password_hash = PasswordHashString::new(&config.password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid CF_AUTH_PASSWORD_HASH: {e}"))?;
        let mut validation = Validation::default();
        validation.sub = Some(TOKEN_SUBJECT.to_string());
        Ok(Self {
            password_hash,
            encoding_key: EncodingKey::from_secret(&config.signing_key),
            decoding_key: DecodingKey::from_secret(&config.signing_key),
            validation,
            token_ttl: config.access_token_ttl,
        })
    }

    /// Exchanges the dashboard password for a bearer token.
    pub fn authenticate(&self, password: &str) -> Result<AccessToken, AuthError> {
        Argon2::default()
            .verify_password(password.as_bytes(), &self.password_hash.password_hash())
            .map_err(|_| AuthError::WrongPassword)?;

        let issued_at = get_current_timestamp();
        let claims = Claims {
            sub: TOKEN_SUBJECT.to_string(),
            iat: issued_at,
            exp: issued_at + self.token_ttl.as_secs(),
        };
        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer",
            expires_in: self.token_ttl.as_secs(),
        })
    }

    /// Accepts a request whose `Authorization` header carries a live token.
    pub fn admit(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|_| ())
            .map_err(|err| {
                tracing::debug!("Rejected access token: {:?}", err.kind());
                AuthError::InvalidToken
            })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Route layer for everything behind the password.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    state.session.admit(request.headers())?;
    Ok(next.run(request).await)
}
