//! Request spans for the HTTP stack.
//!
//! Every request runs inside a `request` span carrying the method, the raw
//! URI, the matched route template and, once [`super::auth`] has resolved the
//! bearer token, the owner the request acts for:
//!
//! ```text
//! INFO request{method=GET uri=/api/analytics route=/api/analytics owner_id=7}: finished processing request latency=4 ms status=200
//! INFO request{method=GET uri=/x7Kp2Qa9 route=/{code}}: finished processing request latency=1 ms status=307
//! ```
//!
//! Grouping by `route` keeps redirect traffic in one bucket instead of one per
//! short code.

use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span, field};

use crate::domain::entities::OwnerId;

/// Builds the `request` span for each incoming request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(|path| field::display(path.as_str().to_owned()));

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            route,
            owner_id = field::Empty,
        )
    }
}

/// Tracing layer: one span per request, response logged at `INFO` with latency.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Records the authenticated owner on the current request span.
pub fn record_owner(owner_id: OwnerId) {
    Span::current().record("owner_id", owner_id.0);
}
