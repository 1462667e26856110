use shopspec_widget::ViewError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

/// Convert a DOM exception into a view error
pub fn js_err(e: JsValue) -> ViewError {
    ViewError::Dom(format!("{:?}", e))
}

/// Convert a view error into a JS exception
pub fn view_err(e: ViewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Create element with class
pub fn create_element_with_class(
    document: &Document,
    tag: &str,
    class: &str,
) -> Result<Element, ViewError> {
    let element = document.create_element(tag).map_err(js_err)?;
    element.set_class_name(class);
    Ok(element)
}

/// Create element with class and ID, cast to a concrete element type
pub fn create_typed<T: JsCast>(
    document: &Document,
    tag: &str,
    class: &str,
    id: &str,
) -> Result<T, ViewError> {
    let element = create_element_with_class(document, tag, class)?;
    element.set_id(id);
    element
        .dyn_into::<T>()
        .map_err(|_| ViewError::Dom(format!("<{}> has an unexpected type: {}", tag, id)))
}

/// Add event listener to a target for the lifetime of the page
pub fn add_event_listener<F>(target: &EventTarget, event: &str, callback: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Keep the closure alive
    Ok(())
}

/// Show or hide an element through its inline style
pub fn set_display(element: &HtmlElement, display: &str) -> Result<(), ViewError> {
    element
        .style()
        .set_property("display", display)
        .map_err(js_err)
}

/// Add or remove a class
pub fn set_class(element: &Element, class: &str, enabled: bool) -> Result<(), ViewError> {
    element
        .class_list()
        .toggle_with_force(class, enabled)
        .map(|_| ())
        .map_err(js_err)
}

/// Scroll element to bottom
pub fn scroll_to_bottom(element: &Element) {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        html_element.set_scroll_top(html_element.scroll_height());
    }
}
