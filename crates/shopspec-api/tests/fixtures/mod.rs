use serde_json::{json, Value};
use shopspec_api::{build_outbound, OutboundRequest, PerplexityClient};
use shopspec_types::{ChatOptions, ConversationHistory, Message, PageContext};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const COMPLETIONS_PATH: &str = "/chat/completions";

/// Mock completion endpoint
pub struct CompletionMockServer {
    server: MockServer,
}

impl CompletionMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), COMPLETIONS_PATH)
    }

    pub fn client(&self) -> PerplexityClient {
        PerplexityClient::new(&ChatOptions::default().with_endpoint(self.endpoint()))
    }

    /// Mock a successful completion; expects exactly one call
    pub async fn mock_success(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an error status with a JSON error body
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {
                    "message": message,
                    "type": "server_error"
                }
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an arbitrary raw response
    pub async fn mock_raw(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "cmpl-test",
        "model": "sonar-pro",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {
                "role": "assistant",
                "content": content
            }
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 20,
            "total_tokens": 30
        }
    })
}

pub fn shop_page() -> PageContext {
    PageContext::new(
        "www.shop.example",
        "https://www.shop.example/p/trail-runner",
        "Trail Runner 3",
    )
}

pub fn outbound_for(question: &str) -> OutboundRequest {
    let mut history = ConversationHistory::new();
    history.push(Message::user(question));
    let page = shop_page();
    build_outbound(
        Some(TEST_API_KEY),
        &ChatOptions::default(),
        &page.domain(),
        &page,
        &history,
    )
    .expect("key is configured")
}
