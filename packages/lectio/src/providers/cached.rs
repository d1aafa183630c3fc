//! Memoizing wrapper around a provider.

use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{GenerateOptions, LlmProvider};
use crate::cache::TtlCache;
use crate::error::Result;

/// Completions stay warm for this long.
const CACHE_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// Caches completions keyed by a digest of (model, prompt).
///
/// Sampling options are not part of the key; the pipeline uses one fixed
/// temperature, and a repeated (model, prompt) pair is exactly the case the
/// cache exists for.
pub struct CachedProvider<P> {
    inner: P,
    cache: TtlCache<String>,
}

impl<P> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: TtlCache::new(CACHE_TTL),
        }
    }

    fn cache_key(model: &str, prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model.as_bytes());
        hasher.update([0]);
        hasher.update(prompt.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl<P: LlmProvider> LlmProvider for CachedProvider<P> {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String> {
        let key = Self::cache_key(model, prompt);
        if let Some(hit) = self.cache.get(&key) {
            debug!(model = %model, "completion cache hit");
            return Ok(hit);
        }

        let completion = self.inner.generate(model, prompt, options).await?;
        self.cache.insert(key, completion.clone());
        Ok(completion)
    }
}
