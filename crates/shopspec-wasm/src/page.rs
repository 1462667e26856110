use shopspec_types::PageContext;
use shopspec_widget::config::{
    GLOBAL_CONFIG_NAME, META_KEY_NAME, SCRIPT_ALT_KEY_ATTRIBUTE, SCRIPT_KEY_ATTRIBUTE,
    SCRIPT_SRC_FRAGMENT,
};
use shopspec_widget::{ConfigSources, GlobalConfig, ScriptTag};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

/// Hostname, URL and title of the embedding page
pub fn read_page_context(window: &Window, document: &Document) -> PageContext {
    let location = window.location();
    let hostname = location.hostname().unwrap_or_else(|e| {
        log::error!("ShopSpec: Error detecting domain: {:?}", e);
        String::new()
    });
    let url = location.href().unwrap_or_default();
    PageContext::new(hostname, url, document.title())
}

/// Collect every place the page may configure the API key
pub fn read_config_sources(window: &Window, document: &Document) -> ConfigSources {
    ConfigSources {
        scripts: read_script_tags(document),
        global: read_global_config(window),
        meta_key: read_meta_key(document),
    }
}

fn read_script_tags(document: &Document) -> Vec<ScriptTag> {
    let selector = format!("script[src*=\"{}\"]", SCRIPT_SRC_FRAGMENT);
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|script| ScriptTag {
            api_key: script.get_attribute(SCRIPT_KEY_ATTRIBUTE),
            perplexity_key: script.get_attribute(SCRIPT_ALT_KEY_ATTRIBUTE),
        })
        .collect()
}

fn read_global_config(window: &Window) -> Option<GlobalConfig> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(GLOBAL_CONFIG_NAME)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let json: String = js_sys::JSON::stringify(&value).ok()?.into();
    GlobalConfig::from_json(&json)
}

fn read_meta_key(document: &Document) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", META_KEY_NAME);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}
