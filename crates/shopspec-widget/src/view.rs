use crate::markup::{parse_links, Segment};
use crate::state::UiState;

/// Marker prefixed to every error shown in the chat
pub const ERROR_MARKER: &str = "❌";

/// Failure of the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result of asking a view to mount the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted,
    AlreadyMounted,
}

/// Static text of the widget chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetText {
    pub title: String,
    pub greeting: String,
    pub typing: String,
    pub placeholder: String,
    pub toggle_tooltip: String,
}

impl WidgetText {
    pub fn for_domain(domain: &str) -> Self {
        Self {
            title: "Product Assistant".to_string(),
            greeting: format!(
                "Hi! I'm your product assistant. I can help you find the perfect products from {}. What are you looking for?",
                domain
            ),
            typing: "Assistant is typing...".to_string(),
            placeholder: "Ask about products...".to_string(),
            toggle_tooltip: "Chat with our product assistant".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Bot,
    Error,
}

impl MessageKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::User => "shopspec-message user",
            MessageKind::Bot => "shopspec-message bot",
            MessageKind::Error => "shopspec-message bot error",
        }
    }
}

/// A chat entry ready to be inserted into the message list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub kind: MessageKind,
    pub segments: Vec<Segment>,
}

impl RenderedMessage {
    /// Visitor text is shown verbatim
    pub fn user(content: &str) -> Self {
        Self {
            kind: MessageKind::User,
            segments: vec![Segment::Text(content.to_string())],
        }
    }

    /// Assistant text gets its links made clickable
    pub fn bot(content: &str) -> Self {
        Self {
            kind: MessageKind::Bot,
            segments: parse_links(content),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: MessageKind::Error,
            segments: vec![Segment::Text(format!("{} {}", ERROR_MARKER, message))],
        }
    }

    /// Visible text of the whole message
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Link { text, url } => Some((text.as_str(), url.as_str())),
            Segment::Text(_) => None,
        })
    }
}

/// Rendering surface driven by [`crate::ChatWidget`]
///
/// The browser implementation lives in `shopspec-wasm`; tests use an
/// in-memory page.
pub trait WidgetView {
    /// Build the widget structure once. Must report `AlreadyMounted` without
    /// touching the page when a widget is already present.
    fn mount(&mut self, text: &WidgetText) -> Result<MountOutcome, ViewError>;

    /// Bring the presentation in line with `ui`
    fn render(&mut self, ui: &UiState) -> Result<(), ViewError>;

    /// Append a message at the bottom of the list and scroll to it
    fn append_message(&mut self, message: &RenderedMessage) -> Result<(), ViewError>;

    /// Focus the text input after `delay_ms`
    fn schedule_focus(&mut self, delay_ms: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_has_marker() {
        let message = RenderedMessage::error("boom");
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text(), "❌ boom");
        assert_eq!(message.links().count(), 0);
    }

    #[test]
    fn test_user_message_is_not_linkified() {
        let message = RenderedMessage::user("[x](https://s.example)");
        assert_eq!(message.links().count(), 0);
        assert_eq!(message.text(), "[x](https://s.example)");
    }

    #[test]
    fn test_bot_message_links() {
        let message = RenderedMessage::bot("See [these shoes](https://shop.example/p/1)");
        let links: Vec<_> = message.links().collect();
        assert_eq!(links, vec![("these shoes", "https://shop.example/p/1")]);
        assert_eq!(message.text(), "See these shoes");
    }

    #[test]
    fn test_greeting_mentions_domain() {
        let text = WidgetText::for_domain("shop.example");
        assert!(text.greeting.contains("from shop.example."));
    }
}
