use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{auth::AccessToken, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatus {
    requires_password: bool,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let (token, _trigger) = state.session.login(&request.password).await?;
    Ok(Json(token))
}

async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatus> {
    Json(AuthStatus {
        requires_password: state.session.requires_password(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/status", get(auth_status))
        .route("/auth/login", post(login))
}
