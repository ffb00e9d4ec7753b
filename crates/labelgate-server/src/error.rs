use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use labelgate_core::ExtenderError;

/// Fixed body sent when the response cannot be serialized
pub const ENCODE_ERROR_BODY: &str = "Encode error";

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request body missing, unreadable or not ExtenderArgs (404, empty body)
    Decode(ExtenderError),

    /// Filter result could not be serialized (400)
    Encode(ExtenderError),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Decode(err) | ApiError::Encode(err) => write!(f, "{}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Causes are logged by the caller and never sent back to the scheduler
        match self {
            ApiError::Decode(_) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Encode(_) => (StatusCode::BAD_REQUEST, ENCODE_ERROR_BODY).into_response(),
        }
    }
}

impl From<ExtenderError> for ApiError {
    fn from(err: ExtenderError) -> Self {
        match err {
            ExtenderError::Encode { .. } => ApiError::Encode(err),
            _ => ApiError::Decode(err),
        }
    }
}
