//! Offline stand-in provider returning canned responses.

use async_trait::async_trait;

use super::{GenerateOptions, LlmProvider};
use crate::error::Result;

/// Canned responses for the three pipeline prompts, keyed on distinctive
/// phrases in the prompt text. Performs no I/O.
pub struct FakeProvider;

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn generate(
        &self,
        _model: &str,
        prompt: &str,
        _options: GenerateOptions,
    ) -> Result<String> {
        if prompt.contains("Build an HTML fragment") {
            return Ok("<section>stub html</section>".to_string());
        }
        if prompt.contains("art curator") {
            return Ok(concat!(
                "{\"title\": \"Test Art\", \"artist\": \"Anon\", ",
                "\"year\": \"1900\", \"image_url\": ",
                "\"https://upload.wikimedia.org/test.jpg\"}"
            )
            .to_string());
        }
        Ok("stub reflection".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts;

    #[tokio::test]
    async fn canned_response_tracks_prompt_kind() {
        let provider = FakeProvider;
        let options = GenerateOptions::default();

        let reflection = provider
            .generate("m", &prompts::make_prompt1("block"), options)
            .await
            .unwrap();
        assert_eq!(reflection, "stub reflection");

        let art = provider
            .generate("m", &prompts::make_prompt2("2024-05-04", "block"), options)
            .await
            .unwrap();
        assert!(art.contains("Test Art"));
        assert!(art.contains("upload.wikimedia.org"));

        let html = provider
            .generate("m", &prompts::make_prompt3("2024-05-04", "blocks"), options)
            .await
            .unwrap();
        assert_eq!(html, "<section>stub html</section>");
    }
}
