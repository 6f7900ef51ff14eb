//! API Client Error Types

use thiserror::Error;

/// Failure below HTTP: DNS, connection, TLS, timeouts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Errors surfaced by [`ApiClient`](super::ApiClient) calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// 401; the session has already been cleared
    #[error("session expired, please sign in again")]
    Unauthorized,

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Generic text for load failures shown on pages
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Status { status, message } if (400..500).contains(status) && !message.is_empty() => {
                message.clone()
            }
            _ => "Failed to load data. Please refresh the page.".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert!(ApiError::Transport(TransportError::Timeout)
            .user_message()
            .contains("refresh"));
        assert_eq!(
            ApiError::Status { status: 422, message: "Invalid phone".into() }.user_message(),
            "Invalid phone"
        );
        assert!(ApiError::Status { status: 500, message: "db down".into() }
            .user_message()
            .contains("refresh"));
        assert!(ApiError::Status { status: 404, message: String::new() }.is_not_found());
    }
}
