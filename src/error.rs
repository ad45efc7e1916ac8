use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Route not found: {0}")]
    NotFound(String),
}

/// JSON body for error responses
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    path: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(path) => {
                tracing::debug!(%path, "No route matched");
                let body = ErrorBody {
                    error: "not found",
                    path,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }
}
