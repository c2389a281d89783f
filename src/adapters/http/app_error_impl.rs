use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "invalid or expired access link" })),
            )
                .into_response(),
            AppError::PasscodeMismatch => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "granted": false, "error": "invalid passcode" })),
            )
                .into_response(),
            AppError::Dispatch(_) => (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "something went wrong sending email" })),
            )
                .into_response(),
            AppError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": msg })),
            )
                .into_response(),
            AppError::AccessDenied => {
                (StatusCode::UNAUTHORIZED, "Access not granted").into_response()
            }
            AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
