use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode, request::Parts};

use owned_content::{
    CsrfToken, Identity, SessionUser, Stores, csrf_matches, get_session_id_from_headers,
    get_user_and_csrf_token_from_session,
};

use crate::redirect::login_redirect;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Why a request could not be tied to a usable session
#[derive(Debug)]
pub enum AuthRejection {
    /// No valid session. Carries the path to come back to after login.
    Login { next: String },
    /// A state-changing request failed the CSRF check
    Csrf,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Login { next } => {
                tracing::debug!("Redirecting anonymous request for {} to login", next);
                login_redirect(&next)
            }
            Self::Csrf => (StatusCode::FORBIDDEN, "CSRF verification failed").into_response(),
        }
    }
}

/// Lets handlers returning `(StatusCode, String)` errors use `?` on
/// [`verify_form_csrf`].
impl From<AuthRejection> for (StatusCode, String) {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::Login { .. } => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            AuthRejection::Csrf => (StatusCode::FORBIDDEN, "CSRF verification failed".to_string()),
        }
    }
}

/// Authenticated user, available as an axum extractor.
///
/// Extraction fails with a redirect to the login page when there is no valid
/// session. For POST, PUT, PATCH and DELETE the `X-CSRF-Token` header is
/// checked against the session; form posts may instead carry the token in a
/// `csrf_token` field, which the handler checks with [`verify_form_csrf`].
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use owned_content::Stores;
/// use owned_content_axum::AuthUser;
///
/// async fn protected(user: AuthUser) -> String {
///     format!("Hello, {}!", user.username)
/// }
///
/// let app: Router<Stores> = Router::new().route("/protected", get(protected));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    /// CSRF token of the current session, to embed in forms
    pub csrf_token: String,
    pub csrf_via_header_verified: bool,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::user(self.id.clone())
    }

    fn new(user: SessionUser, csrf_token: &CsrfToken) -> Self {
        Self {
            id: user.id,
            username: user.username,
            csrf_token: csrf_token.as_str().to_string(),
            csrf_via_header_verified: false,
        }
    }
}

/// Identity of an optional user, anonymous when there is none
pub fn identity_of(user: Option<&AuthUser>) -> Identity {
    user.map(AuthUser::identity).unwrap_or(Identity::Anonymous)
}

/// Accept a form post whose token arrived in the body, unless the header
/// check already passed.
pub fn verify_form_csrf(user: &AuthUser, submitted: &str) -> Result<(), AuthRejection> {
    if user.csrf_via_header_verified {
        return Ok(());
    }
    if csrf_matches(&CsrfToken::new(user.csrf_token.clone()), submitted) {
        tracing::trace!("CSRF token via form field verified.");
        Ok(())
    } else {
        tracing::warn!("CSRF token mismatch in form field");
        Err(AuthRejection::Csrf)
    }
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::DELETE | Method::PATCH
    )
}

fn is_form_like(parts: &Parts) -> bool {
    parts
        .headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| {
            ct.starts_with("application/x-www-form-urlencoded")
                || ct.starts_with("multipart/form-data")
        })
}

fn requested_path(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}

/// Load the session user, or `None` when there is no valid session.
async fn session_user(parts: &Parts, stores: &Stores) -> Option<(SessionUser, CsrfToken)> {
    let session_id = match get_session_id_from_headers(&parts.headers) {
        Ok(Some(id)) => id,
        Ok(None) => return None,
        Err(e) => {
            tracing::debug!("Unreadable session cookie: {}", e);
            return None;
        }
    };

    match get_user_and_csrf_token_from_session(stores, session_id).await {
        Ok(found) => Some(found),
        Err(e) => {
            tracing::debug!("Session lookup failed: {}", e);
            None
        }
    }
}

fn check_csrf(parts: &Parts, user: &mut AuthUser, token: &CsrfToken) -> Result<(), AuthRejection> {
    if !is_state_changing(&parts.method) {
        return Ok(());
    }

    match parts.headers.get(CSRF_HEADER).and_then(|h| h.to_str().ok()) {
        Some(header_token) => {
            if csrf_matches(token, header_token) {
                user.csrf_via_header_verified = true;
                tracing::trace!("CSRF token via X-CSRF-Token header verified.");
                Ok(())
            } else {
                tracing::warn!("CSRF token mismatch (X-CSRF-Token)");
                Err(AuthRejection::Csrf)
            }
        }
        None if is_form_like(parts) => {
            tracing::trace!("X-CSRF-Token header not found, form field check left to handler");
            Ok(())
        }
        None => {
            tracing::warn!(
                "CSRF protection: X-CSRF-Token header missing for {} with non-form body",
                parts.method
            );
            Err(AuthRejection::Csrf)
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    Stores: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let stores = Stores::from_ref(state);

        let Some((session_user, csrf_token)) = session_user(parts, &stores).await else {
            return Err(AuthRejection::Login {
                next: requested_path(parts),
            });
        };

        let mut auth_user = AuthUser::new(session_user, &csrf_token);
        check_csrf(parts, &mut auth_user, &csrf_token)?;
        Ok(auth_user)
    }
}

/// `Option<AuthUser>` is `None` for anonymous visitors. A CSRF failure by a
/// logged-in user is still rejected.
impl<S> OptionalFromRequestParts<S> for AuthUser
where
    Stores: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(AuthRejection::Login { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn parts(method: Method, headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().method(method).uri("/edit/x/?a=1");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn user(token: &str) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            username: "author".to_string(),
            csrf_token: token.to_string(),
            csrf_via_header_verified: false,
        }
    }

    #[test]
    fn test_get_needs_no_csrf() {
        let mut u = user("tok");
        let token = CsrfToken::new("tok".to_string());
        assert!(check_csrf(&parts(Method::GET, &[]), &mut u, &token).is_ok());
        assert!(!u.csrf_via_header_verified);
    }

    #[test]
    fn test_header_token_checked() {
        let token = CsrfToken::new("tok".to_string());

        let mut u = user("tok");
        assert!(check_csrf(&parts(Method::POST, &[(CSRF_HEADER, "tok")]), &mut u, &token).is_ok());
        assert!(u.csrf_via_header_verified);

        let mut u = user("tok");
        assert!(matches!(
            check_csrf(&parts(Method::POST, &[(CSRF_HEADER, "bad")]), &mut u, &token),
            Err(AuthRejection::Csrf)
        ));
    }

    #[test]
    fn test_form_post_defers_to_handler() {
        let token = CsrfToken::new("tok".to_string());
        let form = parts(
            Method::POST,
            &[("content-type", "application/x-www-form-urlencoded")],
        );
        let mut u = user("tok");
        assert!(check_csrf(&form, &mut u, &token).is_ok());
        assert!(!u.csrf_via_header_verified);

        let mut u = user("tok");
        assert!(matches!(
            check_csrf(&parts(Method::DELETE, &[]), &mut u, &token),
            Err(AuthRejection::Csrf)
        ));
    }

    #[test]
    fn test_verify_form_csrf() {
        let u = user("tok");
        assert!(verify_form_csrf(&u, "tok").is_ok());
        assert!(verify_form_csrf(&u, "nope").is_err());

        let mut verified = user("tok");
        verified.csrf_via_header_verified = true;
        assert!(verify_form_csrf(&verified, "").is_ok());
    }

    #[test]
    fn test_identity_of() {
        assert_eq!(identity_of(None), Identity::Anonymous);
        assert_eq!(identity_of(Some(&user("t"))), Identity::user("u1"));
    }

    #[test]
    fn test_requested_path_keeps_query() {
        assert_eq!(requested_path(&parts(Method::GET, &[])), "/edit/x/?a=1");
    }

    #[test]
    fn test_login_rejection_redirects() {
        let response = AuthRejection::Login {
            next: "/notes/".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[http::header::LOCATION],
            "/auth/login/?next=/notes/"
        );
        assert_eq!(
            AuthRejection::Csrf.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_rejection_as_status_tuple() {
        let (status, _): (StatusCode, String) = AuthRejection::Csrf.into();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
