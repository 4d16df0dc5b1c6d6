pub mod calculate;
pub mod form;
pub mod health;
pub mod openapi;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::CalculationError;
use crate::models::validation::ValidationError;
use crate::report::ReportError;
use crate::services::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Calculation(_) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::NotFound) => StatusCode::NOT_FOUND,
            Self::Session(SessionError::Expired) => StatusCode::GONE,
            Self::Session(SessionError::AlreadyUsed) => StatusCode::FORBIDDEN,
            Self::Session(SessionError::Capacity) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Report(err) => {
                tracing::error!(error = %err, "report generation failed");
                "Failed to generate report".to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
