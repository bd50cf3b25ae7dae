mod csrf;
mod session;

pub use csrf::csrf_matches;
pub use session::{
    get_session_id_from_headers, get_user_and_csrf_token_from_session, new_session_header,
    prepare_logout_response,
};
