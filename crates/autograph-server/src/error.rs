use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use autograph_core::{ErrorDetail, MISSING_KEY_DETAIL};
use autograph_generate::GenerateError;

/// Every way a `/generate` call can fail, mapped onto a status and a `{"detail"}` body.
#[derive(Debug)]
pub enum ApiError {
    Generate(GenerateError),
    Body(JsonRejection),
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        Self::Generate(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        Self::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Generate(GenerateError::InvalidRequest) => {
                (StatusCode::BAD_REQUEST, MISSING_KEY_DETAIL.to_string())
            }
            ApiError::Generate(err @ GenerateError::Upstream(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Body(rejection) => (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
        };
        (status, Json(ErrorDetail::new(detail))).into_response()
    }
}
