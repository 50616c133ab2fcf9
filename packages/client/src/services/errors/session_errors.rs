use crate::repositories::errors::api_errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// The request never got a response.
    Transport,
    /// The server answered with a non-2xx status other than 404.
    Rejected,
    NotFound,
    /// A response or board blob could not be decoded.
    Decode,
}

/// Failure of an orchestrator action: what went wrong plus the message shown to
/// the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl SessionError {
    /// Uses the server's message when the rejection carried one, `fallback` otherwise.
    pub fn from_api(error: &ApiError, fallback: &str) -> Self {
        let kind = match error {
            ApiError::Transport(_) => SessionErrorKind::Transport,
            ApiError::NotFound(_) => SessionErrorKind::NotFound,
            ApiError::Rejected { .. } => SessionErrorKind::Rejected,
            ApiError::Serialization(_) => SessionErrorKind::Decode,
        };
        SessionError {
            kind,
            message: error.server_message().unwrap_or(fallback).to_string(),
            status: error.status(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SessionError {}
