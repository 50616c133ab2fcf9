/// Failures at the network boundary, split by where they happened so callers
/// never have to sniff message strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Transport(String),
    NotFound(Option<String>),
    Rejected { status: u16, message: Option<String> },
    Serialization(String),
}

impl ApiError {
    /// Message the server put in the rejection body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound(message) | ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::Transport(_) | ApiError::Serialization(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Serialization(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::NotFound(_) => write!(f, "Not found"),
            ApiError::Rejected { status, message } => match message {
                Some(message) => write!(f, "Rejected with status {}: {}", status, message),
                None => write!(f, "Rejected with status {}", status),
            },
            ApiError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
