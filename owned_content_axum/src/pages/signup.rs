use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use owned_content::{ContentError, FormErrors, SignupForm, Stores, register_user};

use crate::config::{OC_LOGIN_URL, OC_SIGNUP_URL};
use crate::error::IntoResponseError;
use crate::redirect::found;

#[derive(Template)]
#[template(path = "signup.j2")]
struct SignupTemplate<'a> {
    username: &'a str,
    errors: &'a FormErrors,
    signup_url: &'a str,
    login_url: &'a str,
}

fn render(username: &str, errors: &FormErrors) -> Result<Response, (StatusCode, String)> {
    let template = SignupTemplate {
        username,
        errors,
        signup_url: OC_SIGNUP_URL.as_str(),
        login_url: OC_LOGIN_URL.as_str(),
    };
    let html = Html(template.render().into_response_error()?);
    Ok(html.into_response())
}

pub(super) async fn signup_form() -> Result<Response, (StatusCode, String)> {
    render("", &FormErrors::new())
}

/// New accounts are sent on to the login page.
pub(super) async fn signup(
    State(stores): State<Stores>,
    Form(form): Form<SignupForm>,
) -> Result<Response, (StatusCode, String)> {
    match register_user(&stores, &form).await {
        Ok(user) => {
            tracing::info!("Signed up user {}", user.username);
            Ok(found(OC_LOGIN_URL.as_str()))
        }
        Err(ContentError::Validation(errors)) => render(&form.username, &errors),
        Err(e) => Err::<Response, _>(e).into_response_error(),
    }
}
