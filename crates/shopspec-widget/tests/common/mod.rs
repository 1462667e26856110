use async_trait::async_trait;
use shopspec_api::{ChatBackend, ChatError, OutboundRequest};
use shopspec_types::{ChatOptions, PageContext};
use shopspec_widget::{
    ChatWidget, ConfigSources, MountOutcome, RenderedMessage, UiState, ViewError, WidgetText,
    WidgetView,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const TEST_API_KEY: &str = "test-api-key";

/// In-memory stand-in for the host page
#[derive(Debug, Default)]
pub struct PageModel {
    pub mounted: bool,
    pub mount_count: usize,
    pub title: String,
    pub messages: Vec<RenderedMessage>,
    pub window_visible: bool,
    pub toggle_visible: bool,
    pub typing_visible: bool,
    pub send_enabled: bool,
    pub input_value: String,
    pub scrolled_to: usize,
    pub focus_requests: Vec<u32>,
    pub fail_renders: bool,
    pub fail_appends: bool,
}

/// View that records everything into a shared [`PageModel`]
#[derive(Debug, Clone, Default)]
pub struct FakeView {
    pub page: Rc<RefCell<PageModel>>,
}

impl FakeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second view onto the same page
    pub fn sharing(&self) -> Self {
        Self {
            page: self.page.clone(),
        }
    }
}

impl WidgetView for FakeView {
    fn mount(&mut self, text: &WidgetText) -> Result<MountOutcome, ViewError> {
        let mut page = self.page.borrow_mut();
        if page.mounted {
            return Ok(MountOutcome::AlreadyMounted);
        }
        page.mounted = true;
        page.mount_count += 1;
        page.title = text.title.clone();
        page.messages.push(RenderedMessage::bot(&text.greeting));
        page.scrolled_to = page.messages.len();
        Ok(MountOutcome::Mounted)
    }

    fn render(&mut self, ui: &UiState) -> Result<(), ViewError> {
        let mut page = self.page.borrow_mut();
        if page.fail_renders {
            return Err(ViewError::Dom("render rejected".to_string()));
        }
        page.window_visible = ui.is_open();
        page.toggle_visible = ui.toggle_visible();
        page.typing_visible = ui.typing;
        page.send_enabled = ui.send_enabled();
        page.input_value = ui.input.clone();
        Ok(())
    }

    fn append_message(&mut self, message: &RenderedMessage) -> Result<(), ViewError> {
        let mut page = self.page.borrow_mut();
        if page.fail_appends {
            return Err(ViewError::Dom("append rejected".to_string()));
        }
        page.messages.push(message.clone());
        page.scrolled_to = page.messages.len();
        Ok(())
    }

    fn schedule_focus(&mut self, delay_ms: u32) {
        self.page.borrow_mut().focus_requests.push(delay_ms);
    }
}

/// Backend answering from a queue of canned results
#[derive(Default)]
pub struct ScriptedBackend {
    replies: RefCell<VecDeque<Result<String, ChatError>>>,
    pub requests: RefCell<Vec<OutboundRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, content: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(content.to_string()));
        self
    }

    pub fn fail(self, error: ChatError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, request: &OutboundRequest) -> Result<String, ChatError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("default reply".to_string()))
    }
}

pub fn shop_page() -> PageContext {
    PageContext::new(
        "www.shop.example",
        "https://www.shop.example/p/trail-runner",
        "Trail Runner 3",
    )
}

pub fn keyed_sources() -> ConfigSources {
    ConfigSources::default().with_script_key(TEST_API_KEY)
}

pub fn widget_with(view: FakeView, sources: &ConfigSources) -> ChatWidget<FakeView> {
    ChatWidget::init(view, shop_page(), sources, ChatOptions::default())
        .expect("fake view never fails")
        .expect("fresh page mounts")
}

pub fn keyed_widget() -> ChatWidget<FakeView> {
    widget_with(FakeView::new(), &keyed_sources())
}
