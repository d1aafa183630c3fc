//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{LectioError, Result};

/// Which LLM provider backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Offline canned responses; the default, so tests never touch the network.
    #[default]
    Fake,
    /// Ollama's OpenAI-compatible server on localhost.
    Ollama,
}

/// Model names for the three pipeline calls.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub reflection: String,
    pub art: String,
    pub html: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            reflection: "gpt-5-chat-latest".to_string(),
            art: "gpt-5-mini".to_string(),
            html: "gpt-5-mini".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub openai_base_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub models: ModelConfig,
    /// Request timeout for the Ollama chat path.
    pub ollama_timeout: Duration,
    pub usccb_base_url: String,
    pub usccb_daily_url: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Fake,
            openai_base_url: None,
            openai_api_key: None,
            models: ModelConfig::default(),
            ollama_timeout: Duration::from_secs(120),
            usccb_base_url: "https://bible.usccb.org/bible/readings/".to_string(),
            usccb_daily_url: "https://bible.usccb.org/daily-bible-reading".to_string(),
            port: 5057,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `LLM_PROVIDER=ollama` selects the live provider; any other value
    /// (including unset) keeps the offline fake.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Config::default();

        let provider = match env::var("LLM_PROVIDER").ok().as_deref() {
            Some("ollama") => ProviderKind::Ollama,
            _ => ProviderKind::Fake,
        };

        let ollama_timeout = match env::var("OLLAMA_TIMEOUT") {
            Ok(raw) => {
                let seconds = raw.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0);
                let seconds = seconds.ok_or_else(|| {
                    LectioError::Config(format!(
                        "OLLAMA_TIMEOUT must be a non-negative number of seconds: {raw}"
                    ))
                })?;
                Duration::from_secs_f64(seconds)
            }
            Err(_) => defaults.ollama_timeout,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| LectioError::Config(format!("PORT must be a valid port: {raw}")))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            provider,
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            models: ModelConfig {
                reflection: env::var("REFLECTION_MODEL")
                    .unwrap_or(defaults.models.reflection),
                art: env::var("ART_MODEL").unwrap_or(defaults.models.art),
                html: env::var("HTML_MODEL").unwrap_or(defaults.models.html),
            },
            ollama_timeout,
            usccb_base_url: env::var("USCCB_BASE_URL").unwrap_or(defaults.usccb_base_url),
            usccb_daily_url: env::var("USCCB_DAILY_URL").unwrap_or(defaults.usccb_daily_url),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_offline() {
        let config = Config::default();
        assert_eq!(config.provider, ProviderKind::Fake);
        assert_eq!(config.models.reflection, "gpt-5-chat-latest");
        assert_eq!(config.models.art, "gpt-5-mini");
        assert_eq!(config.port, 5057);
        assert_eq!(config.ollama_timeout, Duration::from_secs(120));
    }
}
