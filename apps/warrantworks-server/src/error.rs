//! Error types for the WarrantWorks server

use std::time::Duration;

use analysis_service::AnalysisError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use case_catalog::{CatalogError, DraftError};
use document_intake::{ExtractionError, IntakeError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    FileTooLarge(String),

    #[error("File is empty")]
    EmptyFile,

    #[error("{0}")]
    UnreadableDocument(String),

    #[error("{0}")]
    NoText(String),

    #[error("{0}")]
    UnrecognizedDocumentType(String),

    #[error("Analysis timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid {field}: {reason}")]
    InvalidForm { field: &'static str, reason: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Too many requests, please slow down")]
    RateLimitExceeded,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
    /// Form field at fault, for INVALID_FORM
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl ServerError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::UnsupportedFormat(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_FORMAT")
            }
            ServerError::FileTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ServerError::EmptyFile => (StatusCode::BAD_REQUEST, "EMPTY_FILE"),
            ServerError::UnreadableDocument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_DOCUMENT")
            }
            ServerError::NoText(_) => (StatusCode::UNPROCESSABLE_ENTITY, "NO_TEXT"),
            ServerError::UnrecognizedDocumentType(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNRECOGNIZED_DOCUMENT_TYPE",
            ),
            ServerError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::InvalidForm { .. } => (StatusCode::BAD_REQUEST, "INVALID_FORM"),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ServerError::RateLimitExceeded => {
                (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED")
            }
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if let ServerError::Internal(msg) = &self {
            error!("Internal error: {}", msg);
        }

        let field = match &self {
            ServerError::InvalidForm { field, .. } => Some(*field),
            _ => None,
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<IntakeError> for ServerError {
    fn from(err: IntakeError) -> Self {
        let message = err.to_string();
        match err {
            IntakeError::UnsupportedFormat(_) => ServerError::UnsupportedFormat(message),
            IntakeError::FileTooLarge { .. } => ServerError::FileTooLarge(message),
            IntakeError::EmptyFile => ServerError::EmptyFile,
            IntakeError::ContentMismatch { .. } => ServerError::UnreadableDocument(message),
        }
    }
}

impl From<ExtractionError> for ServerError {
    fn from(err: ExtractionError) -> Self {
        let message = err.to_string();
        match err {
            ExtractionError::Unreadable(_) | ExtractionError::PasswordProtected => {
                ServerError::UnreadableDocument(message)
            }
            ExtractionError::NoText(_) | ExtractionError::Ocr(_) => ServerError::NoText(message),
        }
    }
}

impl From<AnalysisError> for ServerError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Intake(e) => e.into(),
            AnalysisError::Extraction(e) => e.into(),
            e @ AnalysisError::UnrecognizedDocumentType => {
                ServerError::UnrecognizedDocumentType(e.to_string())
            }
            AnalysisError::Timeout(limit) => ServerError::Timeout(limit),
            AnalysisError::Internal(msg) => ServerError::Internal(msg),
        }
    }
}

impl From<DraftError> for ServerError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::InvalidField { field, reason } => ServerError::InvalidForm { field, reason },
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ServerError::FileTooLarge("Request body exceeds the upload limit".to_string());
        }
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

/// Replace the rate limiter's plain-text 429 with the JSON error body
pub async fn rate_limit_response(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let retry_after = response.headers().get(RETRY_AFTER).cloned();
    let mut limited = ServerError::RateLimitExceeded.into_response();
    if let Some(value) = retry_after {
        limited.headers_mut().insert(RETRY_AFTER, value);
    }
    limited
}
