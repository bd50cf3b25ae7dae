use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use owned_content::{
    ContentError, FormErrors, LoginForm, NON_FIELD, Stores, authenticate_user, new_session_header,
};

use crate::config::{OC_LOGIN_REDIRECT_URL, OC_LOGIN_URL, OC_SIGNUP_URL};
use crate::error::IntoResponseError;
use crate::redirect::{found, is_safe_next};

#[derive(Template)]
#[template(path = "login.j2")]
struct LoginTemplate<'a> {
    username: &'a str,
    next: &'a str,
    errors: &'a FormErrors,
    non_field: &'a str,
    login_url: &'a str,
    signup_url: &'a str,
}

#[derive(Deserialize, Default)]
pub(super) struct NextQuery {
    #[serde(default)]
    next: String,
}

#[derive(Deserialize)]
pub(super) struct LoginPayload {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    next: String,
}

fn render(
    username: &str,
    next: &str,
    errors: &FormErrors,
) -> Result<Response, (StatusCode, String)> {
    let template = LoginTemplate {
        username,
        next,
        errors,
        non_field: NON_FIELD,
        login_url: OC_LOGIN_URL.as_str(),
        signup_url: OC_SIGNUP_URL.as_str(),
    };
    let html = Html(template.render().into_response_error()?);
    Ok(html.into_response())
}

pub(super) async fn login_form(
    Query(query): Query<NextQuery>,
) -> Result<Response, (StatusCode, String)> {
    render("", &query.next, &FormErrors::new())
}

pub(super) async fn login(
    State(stores): State<Stores>,
    Form(payload): Form<LoginPayload>,
) -> Result<Response, (StatusCode, String)> {
    let form = LoginForm {
        username: payload.username,
        password: payload.password,
    };

    let user = match authenticate_user(&stores, &form).await {
        Ok(user) => user,
        Err(ContentError::Validation(errors)) => {
            return render(&form.username, &payload.next, &errors);
        }
        Err(e) => return Err::<Response, _>(e).into_response_error(),
    };

    let headers = new_session_header(&stores, &user.id)
        .await
        .map_err(ContentError::from)
        .into_response_error()?;

    let target = if is_safe_next(&payload.next) {
        payload.next.as_str()
    } else {
        OC_LOGIN_REDIRECT_URL.as_str()
    };
    tracing::debug!("User {} logged in, redirecting to {}", user.username, target);

    Ok((headers, found(target)).into_response())
}
