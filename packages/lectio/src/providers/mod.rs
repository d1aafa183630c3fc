//! Pluggable LLM providers.
//!
//! Two variants exist: an offline fake (the default, so the test suite and
//! any unconfigured environment never touch the network) and a live
//! OpenAI-compatible provider used with Ollama. A memoizing wrapper caches
//! completions for the live path.

mod cached;
mod fake;
mod openai;

pub use cached::CachedProvider;
pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, ProviderKind};
use crate::error::{LectioError, Result};

/// Base URL Ollama's OpenAI-compatible server listens on.
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

/// Sampling options for a completion.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: None,
        }
    }
}

/// Interface implemented by language model providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Return a completion for `prompt` from `model`.
    async fn generate(&self, model: &str, prompt: &str, options: GenerateOptions)
        -> Result<String>;
}

/// Select a provider from configuration.
///
/// `LLM_PROVIDER=ollama` requires `OPENAI_BASE_URL` to be exactly the local
/// Ollama endpoint and a non-empty `OPENAI_API_KEY`; the live provider is
/// wrapped in a completion cache. Everything else gets the offline fake.
pub fn from_config(config: &Config) -> Result<Arc<dyn LlmProvider>> {
    match config.provider {
        ProviderKind::Ollama => {
            let base_url = config.openai_base_url.as_deref();
            let api_key = config.openai_api_key.as_deref().unwrap_or("");
            if base_url != Some(OLLAMA_BASE_URL) || api_key.is_empty() {
                return Err(LectioError::Config(format!(
                    "ollama provider requires OPENAI_BASE_URL={OLLAMA_BASE_URL} and OPENAI_API_KEY"
                )));
            }
            let provider =
                OpenAiProvider::new(OLLAMA_BASE_URL, api_key, config.ollama_timeout);
            Ok(Arc::new(CachedProvider::new(provider)))
        }
        ProviderKind::Fake => Ok(Arc::new(FakeProvider)),
    }
}
