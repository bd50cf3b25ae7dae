use http::{Result as HttpResponse, StatusCode};
use owned_content::ContentError;

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Status codes for errors that reach a handler's `?`.
///
/// Validation failures are normally re-rendered into the form before this
/// point; `NotFound` covers resources owned by somebody else.
impl<T> IntoResponseError<T> for Result<T, ContentError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                ContentError::Unauthenticated => StatusCode::UNAUTHORIZED,
                ContentError::NotFound { .. } => StatusCode::NOT_FOUND,
                ContentError::Validation(_) => StatusCode::BAD_REQUEST,
                ContentError::Session(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

/// Askama render failures
impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Template render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}
