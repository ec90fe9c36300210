//! Errors returned by the service API client.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::models::ErrorResponse;
use crate::traits::HttpError;

/// Failure of a call to the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response
    #[error("{0}")]
    Transport(HttpError),

    /// The service answered with a non-2xx status.
    /// `message` is the server's `detail`, or the status text without one.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body could not be deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a server error from a non-2xx answer.
    ///
    /// Prefers the `detail` field of a JSON body; falls back to the status
    /// text, then to `HTTP <status>`.
    pub fn from_status(status: u16, reason: Option<&str>, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message())
            .or_else(|| {
                reason
                    .filter(|r| !r.trim().is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Server { status, message }
    }

    /// The message shown to the user in the conversation's error slot.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(e) => e.to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Json(e) => format!("Unexpected response from server: {}", e),
        }
    }

    /// HTTP status of a server error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::Json(_) => ErrorCategory::Client,
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(e) => !matches!(e, HttpError::InvalidUrl(_)),
            ApiError::Server { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            ApiError::Json(_) => false,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status {
                status,
                reason,
                body,
            } => ApiError::from_status(status, Some(&reason), &body),
            other => ApiError::Transport(other),
        }
    }
}
