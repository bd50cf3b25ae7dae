use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{StatusCode, header::LOCATION};

use crate::config::OC_LOGIN_URL;

/// A `302 Found` to `location`
pub fn found(location: &str) -> Response {
    match Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Body::empty())
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Invalid redirect location {:?}: {}", location, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect").into_response()
        }
    }
}

/// Send an anonymous visitor of `path` to the login page
pub fn login_redirect(path: &str) -> Response {
    found(&login_url_with_next(path))
}

/// `{OC_LOGIN_URL}?next={path}`, with `/` left readable
pub fn login_url_with_next(path: &str) -> String {
    format!(
        "{}?next={}",
        OC_LOGIN_URL.as_str(),
        urlencoding::encode(path).replace("%2F", "/")
    )
}

/// Only local absolute paths are followed after login.
pub fn is_safe_next(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control)
}
