//! Core types and structures for the ShopSpec chat widget
//!
//! This crate provides the conversation model and the chat-completion wire
//! types shared by the API client, the widget controller and the browser
//! binding.

use serde::{Deserialize, Serialize};

mod history;
mod page;

pub use history::ConversationHistory;
pub use page::{detect_domain, PageContext};

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of messages kept in the conversation history
pub const HISTORY_LIMIT: usize = 20;

/// Chat-completion endpoint used when no override is given
pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

/// Model identifier sent with every request
pub const DEFAULT_MODEL: &str = "sonar-pro";

/// Upper bound on the size of a reply
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Low temperature keeps answers focused
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Delay between opening the window and focusing the input
pub const FOCUS_DELAY_MS: u32 = 100;

/// Maximum length accepted by the text input
pub const MAX_INPUT_CHARS: u32 = 500;

/// Domain used when the page has no usable hostname
pub const FALLBACK_DOMAIN: &str = "example-shop.com";

// ============================================================================
// Message Types
// ============================================================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message structure for the chat API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Request body for the chat-completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub search_domain_filter: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Successful chat-completion response
///
/// Every field is optional so that an unexpected shape can be reported as a
/// malformed response instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Assistant text of the first choice, if the response has one
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, returning the remote message when present
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()?
            .error?
            .message
    }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Options for the outbound chat-completion call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ChatOptions {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
