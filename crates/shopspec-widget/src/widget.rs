use shopspec_api::{build_outbound, ChatBackend, ChatError, OutboundRequest};
use shopspec_types::{ChatOptions, ConversationHistory, Message, PageContext, FOCUS_DELAY_MS};

use crate::config::ConfigSources;
use crate::state::{UiState, WindowEffect};
use crate::view::{MountOutcome, RenderedMessage, ViewError, WidgetText, WidgetView};

/// State of a key press in the text field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// An input method is still composing text
    pub composing: bool,
}

impl<'a> KeyPress<'a> {
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// Plain Enter submits. Modified Enter and the Enter that commits an
    /// input-method composition are left to the input.
    pub fn is_submit(&self) -> bool {
        self.key == "Enter"
            && !self.composing
            && !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// A turn whose user message has been recorded and whose request is ready
#[derive(Debug)]
pub struct PendingTurn {
    outbound: Result<OutboundRequest, ChatError>,
}

impl PendingTurn {
    /// Send the request. A turn without an API key fails here without
    /// reaching the backend.
    pub async fn dispatch<B: ChatBackend + ?Sized>(&self, backend: &B) -> Result<String, ChatError> {
        match &self.outbound {
            Ok(request) => backend.complete(request).await,
            Err(e) => Err(e.clone()),
        }
    }
}

/// How a conversation turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Answered,
    Failed(ChatError),
}

/// The chat widget controller
///
/// Owns the conversation and the UI state, and drives a [`WidgetView`].
/// Sending is split into [`ChatWidget::begin_send`] and
/// [`ChatWidget::finish_send`] so that callers holding the widget behind a
/// `RefCell` can release it while the request is in flight.
pub struct ChatWidget<V: WidgetView> {
    view: V,
    page: PageContext,
    domain: String,
    api_key: Option<String>,
    options: ChatOptions,
    history: ConversationHistory,
    ui: UiState,
}

impl<V: WidgetView> ChatWidget<V> {
    /// Mount the widget and resolve its configuration
    ///
    /// Returns `None` when the page already carries a widget.
    pub fn init(
        mut view: V,
        page: PageContext,
        sources: &ConfigSources,
        options: ChatOptions,
    ) -> Result<Option<Self>, ViewError> {
        let domain = page.domain();
        log::info!("ShopSpec: Detected domain: {}", domain);

        if view.mount(&WidgetText::for_domain(&domain))? == MountOutcome::AlreadyMounted {
            log::info!("ShopSpec: widget already mounted, skipping initialization");
            return Ok(None);
        }

        let mut widget = Self {
            view,
            page,
            domain,
            api_key: None,
            options,
            history: ConversationHistory::new(),
            ui: UiState::default(),
        };
        widget.render()?;

        match sources.resolve_api_key() {
            Some(resolved) => {
                log::info!("ShopSpec: API key loaded from {}", resolved.source);
                widget.api_key = Some(resolved.key);
            }
            None => {
                log::warn!("ShopSpec: No API key found. Please configure your Perplexity API key.");
                widget.show_error(ChatError::MissingApiKey.user_message())?;
            }
        }

        Ok(Some(widget))
    }

    fn render(&mut self) -> Result<(), ViewError> {
        self.view.render(&self.ui)
    }

    pub fn toggle(&mut self) -> Result<(), ViewError> {
        let effect = self.ui.toggle();
        self.render()?;
        if effect == WindowEffect::FocusInput {
            self.view.schedule_focus(FOCUS_DELAY_MS);
        }
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), ViewError> {
        self.ui.close();
        self.render()
    }

    /// Mirror the text field
    pub fn set_input(&mut self, value: &str) -> Result<(), ViewError> {
        if self.ui.input != value {
            self.ui.input = value.to_string();
            self.render()?;
        }
        Ok(())
    }

    /// First half of a send: record the user message and build the request
    ///
    /// Returns `None` when the input is blank or a request is in flight.
    pub fn begin_send(&mut self) -> Result<Option<PendingTurn>, ViewError> {
        if self.ui.typing {
            log::debug!("ShopSpec: request in flight, ignoring send");
            return Ok(None);
        }
        let message = self.ui.input.trim().to_string();
        if message.is_empty() {
            return Ok(None);
        }

        self.view.append_message(&RenderedMessage::user(&message))?;
        self.ui.input.clear();
        self.ui.typing = true;
        if let Err(e) = self.render() {
            // The turn never started; leave sending possible
            self.ui.typing = false;
            self.ui.input = message;
            return Err(e);
        }

        self.history.push(Message::user(message));
        let outbound = build_outbound(
            self.api_key.as_deref(),
            &self.options,
            &self.domain,
            &self.page,
            &self.history,
        );

        Ok(Some(PendingTurn { outbound }))
    }

    /// Second half of a send: render the reply or the failure
    pub fn finish_send(
        &mut self,
        result: Result<String, ChatError>,
    ) -> Result<TurnOutcome, ViewError> {
        self.ui.typing = false;

        let shown = match result {
            Ok(reply) => {
                let shown = self.view.append_message(&RenderedMessage::bot(&reply));
                self.history.push(Message::assistant(reply));
                shown.map(|_| TurnOutcome::Answered)
            }
            Err(e) => {
                match &e {
                    ChatError::Http { status, message } => log::error!(
                        "ShopSpec: API Error: status {} message {:?}",
                        status,
                        message
                    ),
                    other => log::error!("ShopSpec: API Error: {}", other),
                }
                self.show_error(e.user_message()).map(|_| TurnOutcome::Failed(e))
            }
        };

        // The typing indicator is cleared even when the message could not be shown
        let rendered = self.render();
        let outcome = shown?;
        rendered?;
        Ok(outcome)
    }

    /// Run a whole turn against `backend`
    pub async fn send_message<B: ChatBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<Option<TurnOutcome>, ViewError> {
        let Some(turn) = self.begin_send()? else {
            return Ok(None);
        };
        let result = turn.dispatch(backend).await;
        self.finish_send(result).map(Some)
    }

    pub fn show_error(&mut self, message: &str) -> Result<(), ViewError> {
        self.view.append_message(&RenderedMessage::error(message))
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_enter_submits() {
        assert!(KeyPress::new("Enter").is_submit());
        assert!(!KeyPress::new("a").is_submit());
    }

    #[test]
    fn test_modified_enter_does_not_submit() {
        let enter = KeyPress::new("Enter");
        for press in [
            KeyPress { shift: true, ..enter },
            KeyPress { ctrl: true, ..enter },
            KeyPress { alt: true, ..enter },
            KeyPress { meta: true, ..enter },
        ] {
            assert!(!press.is_submit(), "{:?}", press);
        }
    }

    #[test]
    fn test_composition_enter_does_not_submit() {
        let press = KeyPress {
            composing: true,
            ..KeyPress::new("Enter")
        };
        assert!(!press.is_submit());
    }
}
