use std::{env, sync::LazyLock};

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SessionId".to_string())
});

pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref())
});

// Default to 10 minutes if not set or invalid
fn parse_max_age(value: Option<&str>) -> u64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(600)
}
