mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{
    csrf_matches, get_session_id_from_headers, get_user_and_csrf_token_from_session,
    new_session_header, prepare_logout_response,
};
pub use types::{CsrfToken, User};
