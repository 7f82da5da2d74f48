//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into the same `{ success: false, error }` envelope the
//! success path uses, so the dashboard always gets a machine-readable body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Webhook secret missing or wrong.
    #[error("Unauthorized")]
    Unauthorized,

    /// No position matched the request.
    #[error("{0}")]
    NotFound(String),

    /// Catch-all for unexpected failures.  The cause is logged, never sent.
    #[error("{public}")]
    Internal {
        public: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(public: &str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            public: public.to_string(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal("Internal server error", err)
    }
}

/// A request body that is not the expected JSON is the caller's fault.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Invalid JSON body: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { public, source } = &self {
            error!(error = ?source, "{public}");
        }

        let status = self.status();
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}
