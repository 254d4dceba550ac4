use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use coinfolio_core::PortfolioView;
use futures_core::stream::Stream;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_portfolio(State(state): State<Arc<AppState>>) -> Json<PortfolioView> {
    Json(state.tracker.view().await)
}

/// Runs one cycle now. A source failure answers 502 and keeps the previous
/// snapshot in place.
async fn refresh_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioView>> {
    state.tracker.refresh().await?;
    Ok(Json(state.tracker.view().await))
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let receiver = BroadcastStream::new(state.event_bus.subscribe());
    let stream = tokio_stream::StreamExt::filter_map(receiver, |event| match event {
        Ok(evt) => {
            let sse_event = SseEvent::default().event(evt.name);
            let sse_event = if let Some(payload) = evt.payload {
                match sse_event.json_data(payload) {
                    Ok(ev) => ev,
                    Err(err) => {
                        tracing::error!(
                            "Failed to serialize SSE payload for {}: {}",
                            evt.name,
                            err
                        );
                        return None;
                    }
                }
            } else {
                sse_event.data("null")
            };
            Some(Ok(sse_event))
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::debug!("SSE client lagged, skipped {} events", skipped);
            None
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(get_portfolio))
        .route("/portfolio/refresh", post(refresh_portfolio))
        .route("/events/stream", get(stream_events))
}
