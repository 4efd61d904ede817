use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::model::ClassifyError;

/// Prompt shown when a request carries no email content.
pub const EMPTY_INPUT_PROMPT: &str = "Please provide the email content.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please provide the email content.")]
    EmptyInput,

    #[error("An error occurred: {0}")]
    Classification(#[from] ClassifyError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyInput => StatusCode::BAD_REQUEST,
            AppError::Classification(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the person who submitted the request.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".into(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            tracing::error!("Internal error: {e:?}");
        }

        (
            self.status(),
            Json(ErrorBody {
                error: self.user_message(),
            }),
        )
            .into_response()
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal(e.into())
    }
}
