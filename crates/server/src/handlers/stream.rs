//! # Progressive Stream Handlers
//!
//! Server-Sent Events for a single fetch run. Each [`FetchEvent`] becomes one
//! SSE event named after its type with a JSON `data` line; the stream closes
//! right after `complete`.

use super::{appstore_run, trustpilot_run, AppError, AppState};
use crate::types::{AppStoreFetchParams, TrustpilotFetchParams};
use axum::{
    extract::{Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::stream::Stream;
use revscope::{spawn_event_stream, FetchEvent};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// GET /api/reviews/appstore/stream
pub async fn appstore_stream(
    State(app_state): State<AppState>,
    Query(params): Query<AppStoreFetchParams>,
) -> Result<Response, AppError> {
    let (source, request) = appstore_run(&app_state, &params)?;
    info!(app_id = %params.app_id, "New SSE client for App Store reviews");
    Ok(sse_response(spawn_event_stream(source, request)))
}

/// GET /api/reviews/trustpilot/stream
pub async fn trustpilot_stream(
    State(app_state): State<AppState>,
    Query(params): Query<TrustpilotFetchParams>,
) -> Result<Response, AppError> {
    let (source, request) = trustpilot_run(&app_state, &params)?;
    info!(domain = %params.domain, "New SSE client for Trustpilot reviews");
    Ok(sse_response(spawn_event_stream(source, request)))
}

fn sse_response(events: UnboundedReceiver<FetchEvent>) -> Response {
    let sse = Sse::new(sse_events(events))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)));
    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (
                HeaderName::from_static("x-accel-buffering"),
                HeaderValue::from_static("no"),
            ),
        ],
        sse,
    )
        .into_response()
}

fn sse_events(
    mut events: UnboundedReceiver<FetchEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        while let Some(event) = events.recv().await {
            let terminal = event.is_terminal();
            debug!("SSE: sending {} event", event.event_type());
            yield Ok(Event::default()
                .event(event.event_type())
                .data(event.payload().to_string()));
            if terminal {
                break;
            }
        }
    }
}
