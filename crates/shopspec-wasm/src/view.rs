use gloo_timers::callback::Timeout;
use shopspec_types::MAX_INPUT_CHARS;
use shopspec_widget::{
    MountOutcome, RenderedMessage, Segment, UiState, ViewError, WidgetText, WidgetView,
};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::dom::{self, js_err};
use crate::styles;

pub mod ids {
    pub const CONTAINER: &str = "shopspec-widget";
    pub const TOGGLE_BUTTON: &str = "shopspec-chat-button";
    pub const WINDOW: &str = "shopspec-chat-window";
    pub const CLOSE_BUTTON: &str = "shopspec-close-button";
    pub const MESSAGES: &str = "shopspec-chat-messages";
    pub const TYPING: &str = "shopspec-typing-indicator";
    pub const INPUT: &str = "shopspec-input-field";
    pub const SEND_BUTTON: &str = "shopspec-send-button";
}

/// Handles to the mounted widget structure
#[derive(Debug, Clone)]
pub struct WidgetElements {
    pub toggle_button: HtmlElement,
    pub window: Element,
    pub close_button: HtmlElement,
    pub messages: Element,
    pub typing: Element,
    pub input: HtmlInputElement,
    pub send_button: HtmlButtonElement,
}

/// [`WidgetView`] backed by the page DOM
pub struct DomView {
    document: Document,
    elements: Option<WidgetElements>,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: None,
        }
    }

    pub fn elements(&self) -> Option<&WidgetElements> {
        self.elements.as_ref()
    }

    fn mounted(&self) -> Result<&WidgetElements, ViewError> {
        self.elements
            .as_ref()
            .ok_or_else(|| ViewError::MissingElement(ids::CONTAINER.to_string()))
    }

    /// Current text of the input field
    pub fn input_value(&self) -> String {
        self.elements
            .as_ref()
            .map(|elements| elements.input.value())
            .unwrap_or_default()
    }

    /// Use the page's own container if it has one, else append one to `<body>`
    fn container(&self) -> Result<Element, ViewError> {
        if let Some(existing) = self.document.get_element_by_id(ids::CONTAINER) {
            log::info!("ShopSpec: mounting into existing #{}", ids::CONTAINER);
            return Ok(existing);
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| ViewError::MissingElement("body".to_string()))?;
        let container = self.document.create_element("div").map_err(js_err)?;
        container.set_id(ids::CONTAINER);
        body.append_child(&container).map_err(js_err)?;
        Ok(container)
    }

    fn build(&self, container: &Element, text: &WidgetText) -> Result<WidgetElements, ViewError> {
        let document = &self.document;

        let toggle_button: HtmlElement =
            dom::create_typed(document, "button", "shopspec-chat-button", ids::TOGGLE_BUTTON)?;
        toggle_button.set_title(&text.toggle_tooltip);
        toggle_button.set_text_content(Some("💬"));

        let window: Element =
            dom::create_typed(document, "div", "shopspec-chat-window", ids::WINDOW)?;

        let header = dom::create_element_with_class(document, "div", "shopspec-chat-header")?;
        let title = document.create_element("h3").map_err(js_err)?;
        title.set_text_content(Some(&text.title));
        let close_button: HtmlElement =
            dom::create_typed(document, "button", "shopspec-close-button", ids::CLOSE_BUTTON)?;
        close_button.set_text_content(Some("×"));
        header.append_child(&title).map_err(js_err)?;
        header.append_child(&close_button).map_err(js_err)?;

        let messages: Element =
            dom::create_typed(document, "div", "shopspec-chat-messages", ids::MESSAGES)?;

        let typing: Element =
            dom::create_typed(document, "div", "shopspec-typing-indicator", ids::TYPING)?;
        typing.set_text_content(Some(&text.typing));

        let input_row = dom::create_element_with_class(document, "div", "shopspec-chat-input")?;
        let input: HtmlInputElement =
            dom::create_typed(document, "input", "shopspec-input-field", ids::INPUT)?;
        input.set_type("text");
        input.set_placeholder(&text.placeholder);
        input.set_max_length(MAX_INPUT_CHARS as i32);
        let send_button: HtmlButtonElement =
            dom::create_typed(document, "button", "shopspec-send-button", ids::SEND_BUTTON)?;
        send_button.set_text_content(Some("➤"));
        send_button.set_disabled(true);
        input_row.append_child(&input).map_err(js_err)?;
        input_row.append_child(&send_button).map_err(js_err)?;

        for child in [&header, &messages, &typing, &input_row] {
            window.append_child(child).map_err(js_err)?;
        }
        container.append_child(&toggle_button).map_err(js_err)?;
        container.append_child(&window).map_err(js_err)?;

        Ok(WidgetElements {
            toggle_button,
            window,
            close_button,
            messages,
            typing,
            input,
            send_button,
        })
    }

    fn message_element(&self, message: &RenderedMessage) -> Result<Element, ViewError> {
        let div = dom::create_element_with_class(&self.document, "div", message.kind.css_class())?;
        for segment in &message.segments {
            match segment {
                Segment::Text(text) => {
                    let node = self.document.create_text_node(text);
                    div.append_child(&node).map_err(js_err)?;
                }
                Segment::Link { text, url } => {
                    let anchor = self.document.create_element("a").map_err(js_err)?;
                    anchor.set_attribute("href", url).map_err(js_err)?;
                    anchor.set_attribute("target", "_blank").map_err(js_err)?;
                    anchor
                        .set_attribute("rel", "noopener noreferrer")
                        .map_err(js_err)?;
                    anchor.set_text_content(Some(text));
                    div.append_child(&anchor).map_err(js_err)?;
                }
            }
        }
        Ok(div)
    }
}

impl WidgetView for DomView {
    fn mount(&mut self, text: &WidgetText) -> Result<MountOutcome, ViewError> {
        if self.document.get_element_by_id(ids::TOGGLE_BUTTON).is_some() {
            return Ok(MountOutcome::AlreadyMounted);
        }

        styles::inject(&self.document)?;
        let container = self.container()?;
        let elements = self.build(&container, text)?;
        self.elements = Some(elements);

        self.append_message(&RenderedMessage::bot(&text.greeting))?;
        log::info!("ShopSpec: widget mounted");
        Ok(MountOutcome::Mounted)
    }

    fn render(&mut self, ui: &UiState) -> Result<(), ViewError> {
        let elements = self.mounted()?;
        dom::set_class(&elements.window, "open", ui.is_open())?;
        dom::set_display(
            &elements.toggle_button,
            if ui.toggle_visible() { "flex" } else { "none" },
        )?;
        dom::set_class(&elements.typing, "show", ui.typing)?;
        elements.send_button.set_disabled(!ui.send_enabled());
        if elements.input.value() != ui.input {
            elements.input.set_value(&ui.input);
        }
        Ok(())
    }

    fn append_message(&mut self, message: &RenderedMessage) -> Result<(), ViewError> {
        let element = self.message_element(message)?;
        let messages = &self.mounted()?.messages;
        messages.append_child(&element).map_err(js_err)?;
        dom::scroll_to_bottom(messages);
        Ok(())
    }

    fn schedule_focus(&mut self, delay_ms: u32) {
        let Some(elements) = self.elements.as_ref() else {
            return;
        };
        let input = elements.input.clone();
        Timeout::new(delay_ms, move || {
            if let Err(e) = input.focus() {
                log::warn!("ShopSpec: could not focus input: {:?}", e);
            }
        })
        .forget();
    }
}
