/// Visibility of the chat window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Closed,
    Open,
}

/// Side effect requested by a window transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEffect {
    None,
    FocusInput,
}

/// Ephemeral UI state rendered by a [`crate::WidgetView`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub window: WindowState,
    pub typing: bool,
    pub input: String,
}

impl UiState {
    pub fn is_open(&self) -> bool {
        self.window == WindowState::Open
    }

    /// The toggle button is only shown while the window is closed
    pub fn toggle_visible(&self) -> bool {
        !self.is_open()
    }

    /// Sending needs text and no request already in flight
    pub fn send_enabled(&self) -> bool {
        !self.typing && !self.input.trim().is_empty()
    }

    pub fn toggle(&mut self) -> WindowEffect {
        match self.window {
            WindowState::Closed => {
                self.window = WindowState::Open;
                WindowEffect::FocusInput
            }
            WindowState::Open => self.close(),
        }
    }

    pub fn close(&mut self) -> WindowEffect {
        self.window = WindowState::Closed;
        WindowEffect::None
    }
}
