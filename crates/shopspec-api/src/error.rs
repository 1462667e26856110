/// Failures of a single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("Unknown error"))]
    Http {
        status: u16,
        message: Option<String>,
    },
    #[error("invalid API response format: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Text shown to the visitor in the chat window
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::MissingApiKey => "API key not configured. Please check setup instructions.",
            ChatError::Network(_) => "Network error - please check your internet connection.",
            ChatError::Http { .. } | ChatError::MalformedResponse(_) => {
                "Sorry, I encountered an error. Please try again."
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
