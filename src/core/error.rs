use thiserror::Error;

use crate::shared::constants::NOTICE_CONNECTION_FAILED;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend rejected request with status {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Status update already in flight for report {0}")]
    UpdateInFlight(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown to the user for this failure.
    ///
    /// Validation and authentication messages are already user-facing and are
    /// returned verbatim. A structured backend message wins over `fallback`;
    /// everything else collapses to `fallback` or the generic connection notice.
    pub fn user_notice(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(msg) | AppError::Unauthenticated(msg) => msg.clone(),
            AppError::Connection(_) => NOTICE_CONNECTION_FAILED.to_string(),
            AppError::Rejected {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AppError::UpdateInFlight(_) => {
                "A status update for this report is already being saved".to_string()
            }
            _ => fallback.to_string(),
        }
    }

    /// Maps a reqwest failure onto the transport/decoding split used by the UI.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Failed to decode backend response: {:?}", err);
            AppError::InvalidResponse(err.to_string())
        } else {
            tracing::error!("Backend request failed: {:?}", err);
            AppError::Connection(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
