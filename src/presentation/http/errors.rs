//! HTTP error handling and response conversion.
//!
//! Every failure a handler can hit is mapped to a status code and a JSON body
//! of the form `{"error": "..."}`. Missing form input is the only expected
//! failure; remote and configuration faults are still answered with a
//! user-facing message instead of tearing down the request.

use crate::domain::consultation::errors::{CompletionError, DomainError, MissingInput};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// A required form input is absent (400).
    MissingInput(MissingInput),

    /// The multipart body could not be read (400).
    BadRequest(String),

    /// Request body exceeds the configured upload limit (413).
    PayloadTooLarge(String),

    /// Upload is not a JPEG or PNG (415).
    UnsupportedMediaType(String),

    /// Remote service unreachable, timed out or overloaded (503).
    ExternalService(String),

    /// Remote service refused the request (502).
    UpstreamRejected(String),

    /// Remote service withheld the answer (422).
    Blocked(String),

    /// Remote service answered with something unusable (502).
    MalformedResponse(String),

    /// Credential or other server configuration is wrong (500).
    Configuration(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(missing) => write!(f, "Missing input: {}", missing),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            Self::UnsupportedMediaType(msg) => write!(f, "Unsupported media type: {}", msg),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
            Self::UpstreamRejected(msg) => write!(f, "Upstream rejected request: {}", msg),
            Self::Blocked(msg) => write!(f, "Response blocked: {}", msg),
            Self::MalformedResponse(msg) => write!(f, "Malformed upstream response: {}", msg),
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamRejected(_) | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            Self::Blocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput(missing) => missing.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::PayloadTooLarge(_) => "Uploaded image is too large".into(),
            Self::UnsupportedMediaType(_) => "Please upload a JPEG or PNG image.".into(),
            Self::ExternalService(_) => {
                "The analysis service is unavailable right now, please try again later.".into()
            }
            Self::UpstreamRejected(_) => "The analysis service could not process this image.".into(),
            Self::Blocked(_) => "The analysis service declined to describe this image.".into(),
            Self::MalformedResponse(_) => "The analysis service returned an unreadable answer.".into(),
            Self::Configuration(_) => "The service is not configured correctly.".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY => {
                tracing::error!("error={}", self);
            }
            StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::debug!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingInput(missing) => AppError::MissingInput(missing),
            DomainError::UnreadableImage => {
                AppError::BadRequest(DomainError::UnreadableImage.to_string())
            }
            DomainError::Completion(err) => err.into(),
            DomainError::Configuration(err) => AppError::Configuration(err.to_string()),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Unavailable(msg) => AppError::ExternalService(msg),
            CompletionError::Authentication(status) => {
                tracing::error!(status, "Remote service rejected the configured API key");
                AppError::Configuration(format!("credential rejected with status {}", status))
            }
            CompletionError::Rejected { status, message } => {
                AppError::UpstreamRejected(format!("status {}: {}", status, message))
            }
            CompletionError::Blocked(reason) => AppError::Blocked(reason),
            CompletionError::MalformedResponse(msg) => AppError::MalformedResponse(msg),
        }
    }
}

// === Multipart Error Conversion ===

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::warn!(multipart_error = %err);
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest("Could not read the submitted form".into())
        }
    }
}
