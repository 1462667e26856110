use shopspec_widget::ViewError;
use web_sys::Document;

use crate::dom::js_err;

pub const STYLE_ELEMENT_ID: &str = "shopspec-widget-styles";

const WIDGET_CSS: &str = r#"
#shopspec-widget {
    position: fixed;
    bottom: 20px;
    right: 20px;
    z-index: 999999;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}
.shopspec-chat-button {
    width: 60px;
    height: 60px;
    border-radius: 50%;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    border: none;
    cursor: pointer;
    box-shadow: 0 4px 20px rgba(0, 0, 0, 0.15);
    transition: all 0.3s ease;
    display: flex;
    align-items: center;
    justify-content: center;
    color: white;
    font-size: 24px;
}
.shopspec-chat-button:hover { transform: scale(1.05); }
.shopspec-chat-button:active { transform: scale(0.95); }
.shopspec-chat-window {
    position: absolute;
    bottom: 80px;
    right: 0;
    width: 350px;
    height: 500px;
    background: white;
    border-radius: 12px;
    box-shadow: 0 10px 40px rgba(0, 0, 0, 0.15);
    display: none;
    flex-direction: column;
    overflow: hidden;
    animation: shopspec-slide-up 0.3s ease-out;
}
.shopspec-chat-window.open { display: flex; }
@keyframes shopspec-slide-up {
    from { opacity: 0; transform: translateY(20px); }
    to { opacity: 1; transform: translateY(0); }
}
.shopspec-chat-header {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 16px 20px;
    display: flex;
    justify-content: space-between;
    align-items: center;
    font-weight: 600;
}
.shopspec-chat-header h3 { margin: 0; font-size: 16px; }
.shopspec-close-button {
    background: none;
    border: none;
    color: white;
    font-size: 20px;
    cursor: pointer;
    width: 24px;
    height: 24px;
    border-radius: 50%;
}
.shopspec-close-button:hover { background-color: rgba(255, 255, 255, 0.2); }
.shopspec-chat-messages {
    flex: 1;
    padding: 16px;
    overflow-y: auto;
    background: #f8fafc;
}
.shopspec-message {
    margin-bottom: 12px;
    padding: 12px 16px;
    border-radius: 18px;
    max-width: 80%;
    word-wrap: break-word;
    line-height: 1.4;
    white-space: pre-wrap;
}
.shopspec-message.user {
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    margin-left: auto;
    border-bottom-right-radius: 4px;
}
.shopspec-message.bot {
    background: white;
    color: #374151;
    border-bottom-left-radius: 4px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}
.shopspec-message.error { color: #b91c1c; }
.shopspec-message a { color: #667eea; text-decoration: underline; }
.shopspec-typing-indicator {
    display: none;
    padding: 8px 16px;
    color: #6b7280;
    font-size: 14px;
    font-style: italic;
}
.shopspec-typing-indicator.show { display: block; }
.shopspec-chat-input {
    padding: 16px;
    background: white;
    border-top: 1px solid #e5e7eb;
    display: flex;
    gap: 8px;
}
.shopspec-input-field {
    flex: 1;
    padding: 12px 16px;
    border: 2px solid #e5e7eb;
    border-radius: 24px;
    outline: none;
    font-size: 14px;
}
.shopspec-input-field:focus { border-color: #667eea; }
.shopspec-send-button {
    width: 44px;
    height: 44px;
    border-radius: 50%;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    border: none;
    color: white;
    cursor: pointer;
}
.shopspec-send-button:disabled { opacity: 0.5; cursor: not-allowed; }
@media (max-width: 480px) {
    .shopspec-chat-window {
        width: calc(100vw - 40px);
        height: calc(100vh - 140px);
    }
}
"#;

/// Add the widget stylesheet to `<head>` unless it is already there
pub fn inject(document: &Document) -> Result<(), ViewError> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| ViewError::MissingElement("head".to_string()))?;
    let style = document.create_element("style").map_err(js_err)?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(WIDGET_CSS));
    head.append_child(&style).map_err(js_err)?;
    Ok(())
}
