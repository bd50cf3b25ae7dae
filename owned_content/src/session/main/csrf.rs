use subtle::ConstantTimeEq;

use crate::session::types::CsrfToken;

/// Constant-time comparison of a submitted token against the session's token
pub fn csrf_matches(expected: &CsrfToken, submitted: &str) -> bool {
    submitted
        .as_bytes()
        .ct_eq(expected.as_str().as_bytes())
        .into()
}
