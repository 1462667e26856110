use async_trait::async_trait;
use shopspec_types::{ApiErrorBody, ChatOptions, ChatResponse};

use crate::{ChatError, OutboundRequest};

/// Anything that can answer a chat-completion request
///
/// Futures are not `Send`: in the browser the call is driven by `fetch` on the
/// page's single thread.
#[async_trait(?Send)]
pub trait ChatBackend {
    /// Send one request and return the assistant's reply text
    async fn complete(&self, request: &OutboundRequest) -> Result<String, ChatError>;
}

/// Client for the Perplexity chat-completion endpoint
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    api_url: String,
    client: reqwest::Client,
}

impl PerplexityClient {
    pub fn new(options: &ChatOptions) -> Self {
        Self {
            api_url: options.endpoint.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn log_request(&self, request: &OutboundRequest) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!("ShopSpec: POST {}", self.api_url);
        log::debug!("ShopSpec: Authorization: Bearer {}", mask_api_key(&request.api_key));
        match serde_json::to_string_pretty(&request.body) {
            Ok(json) => log::debug!("ShopSpec: request body:\n{}", json),
            Err(e) => log::debug!("ShopSpec: error serializing request: {}", e),
        }
    }
}

#[async_trait(?Send)]
impl ChatBackend for PerplexityClient {
    async fn complete(&self, request: &OutboundRequest) -> Result<String, ChatError> {
        self.log_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", request.api_key))
            .header("Content-Type", "application/json")
            .json(&request.body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if status.is_success() {
                ChatError::MalformedResponse(format!("failed to read body: {}", e))
            } else {
                ChatError::Http {
                    status: status.as_u16(),
                    message: None,
                }
            }
        })?;

        if !status.is_success() {
            return Err(ChatError::Http {
                status: status.as_u16(),
                message: ApiErrorBody::message_from(&body),
            });
        }

        parse_completion(&body)
    }
}

/// Extract the assistant text from a successful response body
pub fn parse_completion(body: &str) -> Result<String, ChatError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    response
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| ChatError::MalformedResponse("missing choices[0].message.content".to_string()))
}

/// Keep only a short prefix of a key for diagnostics
pub fn mask_api_key(api_key: &str) -> String {
    format!("{}***", api_key.chars().take(10).collect::<String>())
}
