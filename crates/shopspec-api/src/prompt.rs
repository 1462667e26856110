use shopspec_types::{ChatOptions, ChatRequest, ConversationHistory, Message, PageContext};

use crate::client::mask_api_key;
use crate::ChatError;

/// A fully built request, ready to be sent
#[derive(Clone, PartialEq)]
pub struct OutboundRequest {
    pub api_key: String,
    pub body: ChatRequest,
}

impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("body", &self.body)
            .finish()
    }
}

/// System instruction scoping the assistant to one shop
pub fn build_system_prompt(domain: &str, page: &PageContext) -> String {
    format!(
        "You are a webshop product assistant. You must only recommend and provide product details from the webshop domain: {domain}. \
Never recommend products from other domains or sources. Use your web search functionality only within this domain.\n\
\n\
The user is currently viewing this webpage: {url}\n\
Page title: {title}\n\
\n\
You MUST browse and analyze this URL ({url}) to understand what product or page the user is currently looking at. \
Read the page content, extract product details, specifications, and context.\n\
\n\
When the user asks about \"similar products\" or recommendations, use the information from the current page to provide relevant suggestions for that specific product. \
Do not ask \"what product are you referring to\" - use the context from the page they are viewing.\n\
\n\
When providing links, format them in markdown syntax like [Link Text](URL). \
Always include clickable hyperlinks to the relevant product pages on this webshop.",
        domain = domain,
        url = page.url,
        title = page.title,
    )
}

/// Build the request for the current conversation
///
/// Fails before any I/O when no API key is configured.
pub fn build_outbound(
    api_key: Option<&str>,
    options: &ChatOptions,
    domain: &str,
    page: &PageContext,
    history: &ConversationHistory,
) -> Result<OutboundRequest, ChatError> {
    let api_key = api_key
        .filter(|key| !key.is_empty())
        .ok_or(ChatError::MissingApiKey)?;

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(build_system_prompt(domain, page)));
    messages.extend(history.messages().iter().cloned());

    Ok(OutboundRequest {
        api_key: api_key.to_string(),
        body: ChatRequest {
            model: options.model.clone(),
            messages,
            search_domain_filter: vec![domain.to_string()],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        },
    })
}
