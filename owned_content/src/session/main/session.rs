use chrono::{Duration, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::types::{CsrfToken, StoredSession, User as SessionUser};
use crate::storage::{CacheData, Stores};
use crate::userdb::UserStore;
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Start a session for `user_id` and return the `Set-Cookie` headers for it
#[tracing::instrument(skip(stores))]
pub async fn new_session_header(stores: &Stores, user_id: &str) -> Result<HeaderMap, SessionError> {
    let session_id = gen_random_string(32)?;
    let csrf_token = gen_random_string(32)?;
    let max_age = *SESSION_COOKIE_MAX_AGE;
    let expires_at = Utc::now() + Duration::seconds(max_age as i64);

    let stored_session = StoredSession {
        user_id: user_id.to_string(),
        csrf_token,
        expires_at,
        ttl: max_age,
    };

    stores
        .cache()
        .lock()
        .await
        .put_with_ttl(
            SESSION_PREFIX,
            &session_id,
            CacheData::try_from(stored_session)?,
            max_age as usize,
        )
        .await?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        max_age as i64,
    )?;

    tracing::debug!("Created session for user");
    Ok(headers)
}

/// Expire the session cookie and delete the session it points to, if any
pub async fn prepare_logout_response(
    stores: &Stores,
    headers: &HeaderMap,
) -> Result<HeaderMap, SessionError> {
    let mut response_headers = HeaderMap::new();
    header_set_cookie(
        &mut response_headers,
        SESSION_COOKIE_NAME.as_str(),
        "value",
        -86400,
    )?;

    if let Some(session_id) = get_session_id_from_headers(headers)? {
        stores
            .cache()
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await?;
    }

    Ok(response_headers)
}

pub fn get_session_id_from_headers(headers: &HeaderMap) -> Result<Option<&str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::trace!("No cookie header found");
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let cookie_name = SESSION_COOKIE_NAME.as_str();

    let session_id = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    });

    if session_id.is_none() {
        tracing::trace!("No session cookie '{}' found in cookies", cookie_name);
    }

    Ok(session_id)
}

/// Resolve a session id to its user and CSRF token.
///
/// Unknown, expired and orphaned sessions (whose user no longer exists) are
/// all errors; callers treat any error as "anonymous".
pub async fn get_user_and_csrf_token_from_session(
    stores: &Stores,
    session_id: &str,
) -> Result<(SessionUser, CsrfToken), SessionError> {
    let cached_session = stores
        .cache()
        .lock()
        .await
        .get(SESSION_PREFIX, session_id)
        .await?
        .ok_or(SessionError::SessionError)?;

    let stored_session: StoredSession = cached_session.try_into()?;

    if stored_session.expires_at < Utc::now() {
        tracing::debug!("Session expired at {}", stored_session.expires_at);
        return Err(SessionError::SessionExpiredError);
    }

    let user = UserStore::get_user(stores, &stored_session.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error checking user existence: {}", e);
            SessionError::from(e)
        })?
        .ok_or(SessionError::SessionError)?;

    Ok((
        SessionUser::from(user),
        CsrfToken::new(stored_session.csrf_token),
    ))
}
