//! Client error types

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, or a body that is not the expected JSON
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered, but not with `status: "success"`
    #[error("Request rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Server-supplied message of a rejected request, if it carried a non-empty one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Whether the backend could not be reached or understood
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
