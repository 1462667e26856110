use shopspec_api::PerplexityClient;
use shopspec_types::ChatOptions;
use shopspec_widget::ChatWidget;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod dom;
mod events;
mod page;
mod styles;
mod view;

pub use view::{ids, DomView, WidgetElements};

/// Initialize the WASM module
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("ShopSpec widget WASM initialized");
}

/// Handle to a mounted widget, owned by the embedding script
#[wasm_bindgen]
pub struct ShopSpecWidget {
    widget: events::SharedWidget,
}

#[wasm_bindgen]
impl ShopSpecWidget {
    pub fn toggle(&self) -> Result<(), JsValue> {
        self.widget.borrow_mut().toggle().map_err(dom::view_err)
    }

    pub fn close(&self) -> Result<(), JsValue> {
        self.widget.borrow_mut().close().map_err(dom::view_err)
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.widget.borrow().ui().is_open()
    }

    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.widget.borrow().history().len()
    }
}

/// Mount the widget on the current page
///
/// Returns `undefined` when the page already has a widget.
#[wasm_bindgen(js_name = mountWidget)]
pub fn mount_widget() -> Result<Option<ShopSpecWidget>, JsValue> {
    let window = window()?;
    let document = document()?;

    let page = page::read_page_context(&window, &document);
    let sources = page::read_config_sources(&window, &document);
    let options = ChatOptions::default();
    let client = Rc::new(PerplexityClient::new(&options));

    let Some(widget) = ChatWidget::init(DomView::new(document), page, &sources, options)
        .map_err(dom::view_err)?
    else {
        return Ok(None);
    };

    let widget = Rc::new(RefCell::new(widget));
    events::wire(&widget, &client)?;
    Ok(Some(ShopSpecWidget { widget }))
}

/// Mount the widget once the document has finished loading
#[wasm_bindgen(js_name = mountWhenReady)]
pub async fn mount_when_ready() -> Result<JsValue, JsValue> {
    let document = document()?;

    if document.ready_state() == "loading" {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        let mut tx = Some(tx);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        }) as Box<dyn FnMut()>);
        document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
        closure.forget();
        let _ = rx.await;
    }

    Ok(mount_widget()?.map(JsValue::from).unwrap_or(JsValue::UNDEFINED))
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
