//! Router for the authentication pages

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use owned_content::Stores;

/// Login, logout and signup pages with HTTP tracing.
///
/// Mount under the prefix of `OC_LOGIN_URL`, normally `/auth`:
/// - /auth/login/
/// - /auth/logout/
/// - /auth/signup/
pub fn auth_router() -> Router<Stores> {
    auth_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`auth_router`] without the tracing layer
pub fn auth_router_no_trace() -> Router<Stores> {
    super::pages::router()
}
