//! Live provider speaking the OpenAI-compatible REST API.

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, ResponsesRequest};
use tracing::debug;

use super::{GenerateOptions, LlmProvider};
use crate::error::Result;

/// Timeout for the hosted Responses API path.
const RESPONSES_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenAI-compatible provider.
///
/// Against Ollama (a `localhost:11434` base URL) this speaks the
/// chat-completions endpoint with a long, configurable timeout; against a
/// hosted endpoint it speaks the Responses API with a short one.
pub struct OpenAiProvider {
    chat: OpenAIClient,
    responses: OpenAIClient,
    is_ollama: bool,
}

impl OpenAiProvider {
    pub fn new(base_url: &str, api_key: &str, ollama_timeout: Duration) -> Self {
        let is_ollama = base_url.starts_with("http://localhost:11434")
            || base_url.starts_with("https://localhost:11434");

        Self {
            chat: OpenAIClient::new(api_key)
                .with_base_url(base_url)
                .with_timeout(ollama_timeout),
            responses: OpenAIClient::new(api_key)
                .with_base_url(base_url)
                .with_timeout(RESPONSES_TIMEOUT),
            is_ollama,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String> {
        if self.is_ollama {
            debug!(model = %model, "generating via chat completions");
            let mut request = ChatRequest::new(model)
                .message(Message::system("You are a helpful assistant."))
                .message(Message::user(prompt))
                .temperature(options.temperature);
            if let Some(max_tokens) = options.max_tokens {
                request = request.max_tokens(max_tokens);
            }
            let response = self.chat.chat_completion(request).await?;
            return Ok(response.content);
        }

        debug!(model = %model, "generating via responses API");
        let mut request =
            ResponsesRequest::new(model, prompt).temperature(options.temperature);
        if let Some(max_tokens) = options.max_tokens {
            request = request.max_output_tokens(max_tokens);
        }
        Ok(self.responses.response(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn ollama_base_url_uses_chat_completions() {
        // The detection is on the URL, so exercise the chat path through a
        // mock with a non-ollama URL by constructing the provider directly.
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "hi"}}]
                }));
            })
            .await;

        let mut provider = OpenAiProvider::new(
            &server.url("/v1"),
            "ollama",
            Duration::from_secs(120),
        );
        provider.is_ollama = true;

        let out = provider
            .generate("llama3.1", "hello", GenerateOptions::default())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(out, "hi");
    }

    #[tokio::test]
    async fn hosted_base_url_uses_responses_api() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/responses");
                then.status(200).json_body(serde_json::json!({
                    "output": [
                        {"content": [{"type": "output_text", "text": "hello from responses"}]}
                    ]
                }));
            })
            .await;

        let provider = OpenAiProvider::new(
            &server.url("/v1"),
            "sk-test",
            Duration::from_secs(120),
        );
        assert!(!provider.is_ollama);

        let out = provider
            .generate("gpt-5-mini", "hello", GenerateOptions::default())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(out, "hello from responses");
    }
}
