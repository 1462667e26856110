use shopspec_api::PerplexityClient;
use shopspec_widget::{ChatWidget, KeyPress, ViewError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::KeyboardEvent;

use crate::dom;
use crate::view::DomView;

pub type SharedWidget = Rc<RefCell<ChatWidget<DomView>>>;

/// Connect the mounted elements to the controller
pub fn wire(widget: &SharedWidget, client: &Rc<PerplexityClient>) -> Result<(), JsValue> {
    let elements = widget
        .borrow()
        .view()
        .elements()
        .cloned()
        .ok_or_else(|| JsValue::from_str("Widget not mounted"))?;

    // Toggle chat window
    let w = widget.clone();
    dom::add_event_listener(&elements.toggle_button, "click", move |_| {
        if let Err(e) = w.borrow_mut().toggle() {
            log::error!("ShopSpec: toggle failed: {}", e);
        }
    })?;

    // Close chat window
    let w = widget.clone();
    dom::add_event_listener(&elements.close_button, "click", move |_| {
        if let Err(e) = w.borrow_mut().close() {
            log::error!("ShopSpec: close failed: {}", e);
        }
    })?;

    // Send message on button click
    let (w, c) = (widget.clone(), client.clone());
    dom::add_event_listener(&elements.send_button, "click", move |_| {
        spawn_send(w.clone(), c.clone());
    })?;

    // Send message on Enter key
    let (w, c) = (widget.clone(), client.clone());
    dom::add_event_listener(&elements.input, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = key_event.key();
        let press = KeyPress {
            key: &key,
            shift: key_event.shift_key(),
            ctrl: key_event.ctrl_key(),
            alt: key_event.alt_key(),
            meta: key_event.meta_key(),
            composing: key_event.is_composing(),
        };
        if press.is_submit() {
            key_event.prevent_default();
            spawn_send(w.clone(), c.clone());
        }
    })?;

    // Mirror the text field so the send button follows it
    let w = widget.clone();
    let input = elements.input.clone();
    dom::add_event_listener(&elements.input, "input", move |_| {
        if let Err(e) = w.borrow_mut().set_input(&input.value()) {
            log::error!("ShopSpec: input update failed: {}", e);
        }
    })?;

    Ok(())
}

fn spawn_send(widget: SharedWidget, client: Rc<PerplexityClient>) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = send(widget, client).await {
            log::error!("ShopSpec: Failed to send message: {}", e);
        }
    });
}

/// Run one turn without holding the widget borrow across the request
async fn send(widget: SharedWidget, client: Rc<PerplexityClient>) -> Result<(), ViewError> {
    let turn = {
        let mut w = widget.borrow_mut();
        let value = w.view().input_value();
        w.set_input(&value)?;
        w.begin_send()?
    };
    let Some(turn) = turn else {
        return Ok(());
    };

    let result = turn.dispatch(client.as_ref()).await;
    widget.borrow_mut().finish_send(result)?;
    Ok(())
}
