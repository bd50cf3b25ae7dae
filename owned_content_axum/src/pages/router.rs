use axum::{Router, routing::get};

use owned_content::Stores;

/// Login, logout and signup pages
pub(crate) fn router() -> Router<Stores> {
    Router::new()
        .route(
            "/login/",
            get(super::login::login_form).post(super::login::login),
        )
        .route(
            "/logout/",
            get(super::logout::logout).post(super::logout::logout),
        )
        .route(
            "/signup/",
            get(super::signup::signup_form).post(super::signup::signup),
        )
}
