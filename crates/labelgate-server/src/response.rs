use crate::codec::encode_response;
use crate::error::ApiError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use labelgate_core::ExtenderFilterResult;
use tracing::error;

/// Filter result paired with the status it is sent under
pub struct FilterResponse {
    status: StatusCode,
    body: ExtenderFilterResult,
}

impl FilterResponse {
    /// Status follows the result: a whole-request `Error` is sent as 404
    /// with the body still written
    pub fn new(body: ExtenderFilterResult) -> Self {
        let status = if body.is_error() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };
        Self { status, body }
    }

    /// Status the response will be sent with
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for FilterResponse {
    fn into_response(self) -> Response {
        match encode_response(&self.body) {
            Ok(bytes) => (
                self.status,
                [(header::CONTENT_TYPE, "application/json")],
                bytes,
            )
                .into_response(),
            Err(e) => {
                error!("cannot encode response: {}", e);
                ApiError::from(e).into_response()
            }
        }
    }
}
