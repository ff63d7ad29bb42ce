use impacthub_domain::DomainError;

use super::error_payload::GENERIC_ERROR_MESSAGE;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Failures of the authenticated HTTP client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was unauthorized and the session could not be renewed
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// The backend answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session storage failed: {0}")]
    Storage(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(e) => {
                let text = e.to_string();
                if text.trim().is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    text
                }
            }
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::SessionExpired => {
                DomainError::SessionExpired(SESSION_EXPIRED_MESSAGE.to_string())
            }
            ApiError::Status { status: 404, message } => DomainError::NotFound(message),
            ApiError::Storage(inner) => inner,
            ApiError::Serialization(e) => DomainError::Serialization(e.to_string()),
            other => DomainError::RequestFailed(other.user_message()),
        }
    }
}
