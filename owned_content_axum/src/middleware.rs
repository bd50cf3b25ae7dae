use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header::HeaderValue;

use owned_content::{Stores, get_session_id_from_headers, get_user_and_csrf_token_from_session};

use crate::config::OC_RESPOND_WITH_X_CSRF_TOKEN;
use crate::session::CSRF_HEADER;

// Helper function to add CSRF token to response
fn add_csrf_header(mut response: Response, csrf_token: &str) -> Response {
    if let Ok(header_value) = HeaderValue::from_str(csrf_token) {
        response.headers_mut().insert(CSRF_HEADER, header_value);
    } else {
        tracing::error!("Failed to create CSRF header value from token");
    }
    response
}

/// Echo the session's CSRF token in an `X-CSRF-Token` response header, so
/// scripted clients can send it back. Anonymous requests pass untouched.
///
/// Mount with `axum::middleware::from_fn_with_state(stores, respond_with_csrf_token)`.
pub async fn respond_with_csrf_token(
    State(stores): State<Stores>,
    req: Request,
    next: Next,
) -> Response {
    if !*OC_RESPOND_WITH_X_CSRF_TOKEN {
        return next.run(req).await;
    }

    let csrf_token = match get_session_id_from_headers(req.headers()) {
        Ok(Some(session_id)) => get_user_and_csrf_token_from_session(&stores, session_id)
            .await
            .ok()
            .map(|(_, token)| token),
        _ => None,
    };

    let response = next.run(req).await;
    match csrf_token {
        Some(token) => add_csrf_header(response, token.as_str()),
        None => response,
    }
}
