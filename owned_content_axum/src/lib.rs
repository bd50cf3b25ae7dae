//! owned-content-axum - axum integration for owned-content
//!
//! Provides the [`AuthUser`] extractor, the login/logout/signup pages and the
//! redirect helpers the web applications share. Routers carry
//! [`owned_content::Stores`] as state.

mod config;
mod error;
mod middleware;
mod pages;
mod redirect;
mod router;
mod session;

pub use config::{OC_LOGIN_REDIRECT_URL, OC_LOGIN_URL, OC_LOGOUT_URL, OC_SIGNUP_URL};
pub use error::IntoResponseError;
pub use middleware::respond_with_csrf_token;
pub use redirect::{found, is_safe_next, login_redirect, login_url_with_next};
pub use router::{auth_router, auth_router_no_trace};
pub use session::{AuthRejection, AuthUser, CSRF_HEADER, identity_of, verify_form_csrf};

pub use owned_content::{Stores, init};
