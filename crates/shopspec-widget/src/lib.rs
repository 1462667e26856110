//! The ShopSpec chat widget controller
//!
//! This crate holds everything about the widget that does not need a
//! browser: configuration resolution, the window and typing state machine,
//! link segmentation and the send flow. Presentation goes through the
//! [`WidgetView`] trait.

pub mod config;
pub mod markup;
pub mod state;
pub mod view;
mod widget;

pub use config::{ConfigSources, GlobalConfig, KeySource, ResolvedKey, ScriptTag};
pub use markup::{parse_links, Segment};
pub use state::{UiState, WindowEffect, WindowState};
pub use view::{
    MessageKind, MountOutcome, RenderedMessage, ViewError, WidgetText, WidgetView, ERROR_MARKER,
};
pub use widget::{ChatWidget, KeyPress, PendingTurn, TurnOutcome};

pub use shopspec_api::{ChatBackend, ChatError, PerplexityClient};
pub use shopspec_types::{ChatOptions, ConversationHistory, Message, PageContext, Role};
