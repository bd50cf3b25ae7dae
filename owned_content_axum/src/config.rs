//! URLs of the authentication pages, read once from the environment

use std::sync::LazyLock;

/// Login page; anonymous visitors of protected pages are sent here
/// Default: "/auth/login/"
pub static OC_LOGIN_URL: LazyLock<String> =
    LazyLock::new(|| env_or("OC_LOGIN_URL", "/auth/login/"));

/// Default: "/auth/logout/"
pub static OC_LOGOUT_URL: LazyLock<String> =
    LazyLock::new(|| env_or("OC_LOGOUT_URL", "/auth/logout/"));

/// Default: "/auth/signup/"
pub static OC_SIGNUP_URL: LazyLock<String> =
    LazyLock::new(|| env_or("OC_SIGNUP_URL", "/auth/signup/"));

/// Where a successful login lands when no usable `next` was given
/// Default: "/"
pub static OC_LOGIN_REDIRECT_URL: LazyLock<String> =
    LazyLock::new(|| env_or("OC_LOGIN_REDIRECT_URL", "/"));

/// Whether authenticated responses carry the session's `X-CSRF-Token` header
pub static OC_RESPOND_WITH_X_CSRF_TOKEN: LazyLock<bool> = LazyLock::new(|| {
    parse_flag(std::env::var("OC_RESPOND_WITH_X_CSRF_TOKEN").ok().as_deref())
});

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: Option<&str>) -> bool {
    value.map(|v| v.to_lowercase() != "false").unwrap_or(true)
}
