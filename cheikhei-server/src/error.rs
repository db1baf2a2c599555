//! API error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cheikhei_core::CoreError;
use serde::Serialize;
use tracing::error;

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Service-unavailable error for requests made without a loaded model
    pub fn model_not_loaded() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Model is not loaded.".to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ModelNotLoaded => Self::model_not_loaded(),
            other => {
                error!(reason = %other, "segmentation request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
