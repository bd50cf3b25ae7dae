use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use owned_content::{ContentError, Stores, prepare_logout_response};

use crate::config::OC_LOGIN_URL;
use crate::error::IntoResponseError;

#[derive(Template)]
#[template(path = "logged_out.j2")]
struct LoggedOutTemplate<'a> {
    login_url: &'a str,
}

/// Clears the session, if any, and shows the logged-out page.
pub(super) async fn logout(
    State(stores): State<Stores>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let response_headers = prepare_logout_response(&stores, &headers)
        .await
        .map_err(ContentError::from)
        .into_response_error()?;

    let template = LoggedOutTemplate {
        login_url: OC_LOGIN_URL.as_str(),
    };
    let html = Html(template.render().into_response_error()?);
    Ok((response_headers, html).into_response())
}
