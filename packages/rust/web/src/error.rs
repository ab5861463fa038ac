//! HTTP mapping of lead submission failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokyon_leads::SubmissionError;

/// Error returned by the API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Request body or query could not be read as expected.
    BadRequest(String),
    /// No such resource.
    NotFound(String),
    /// The lead adapter refused or failed the submission.
    Submission(SubmissionError),
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        Self::Submission(err)
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Submission(SubmissionError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Submission(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => {
                json!({ "message": message })
            }
            ApiError::Submission(err) => match err {
                SubmissionError::InvalidInput { missing } => json!({
                    "message": "Missing required fields",
                    "details": missing,
                }),
                SubmissionError::Misconfigured { .. } => json!({
                    "message": "Configuração de servidor incompleta: Falta Token ou ID do Pipefy.",
                }),
                SubmissionError::RemoteUnavailable(context) => json!({
                    "message": "Erro interno de conexão com Pipefy.",
                    "details": context,
                }),
                SubmissionError::RemoteRejected { message, details } => json!({
                    "message": format!("Erro no Pipefy: {message}"),
                    "details": details,
                }),
            },
        };

        (status, Json(body)).into_response()
    }
}
