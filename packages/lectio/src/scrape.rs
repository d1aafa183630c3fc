//! Fetching of USCCB daily-readings pages, with TTL caching and a fallback
//! URL.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::error::{LectioError, Result};

/// Fetched bodies stay warm for this long.
const CACHE_TTL: Duration = Duration::from_secs(3 * 60 * 60);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(20);

/// A fetched readings document and the URL it came from.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub html: String,
    pub url: String,
}

/// Source of readings HTML for a date.
///
/// The production implementation talks to the USCCB site; tests and the
/// `--input` CLI flag substitute local files.
#[async_trait]
pub trait FetchReadings: Send + Sync {
    /// Fetch the readings document for `date` (ISO `YYYY-MM-DD`).
    async fn fetch(&self, date: &str) -> Result<Fetched>;
}

/// HTTP client for the USCCB readings pages.
///
/// Tries `{base}{yyyymmdd}.cfm` first and falls back to
/// `{daily}?date={date}` on any failure. Successful fetches are cached for
/// about three hours.
pub struct UsccbClient {
    client: reqwest::Client,
    base_url: String,
    daily_url: String,
    cache: TtlCache<Fetched>,
}

impl UsccbClient {
    pub fn new(base_url: impl Into<String>, daily_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("lectio/1.0")
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .map_err(|e| LectioError::Config(format!("failed to build HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            daily_url: daily_url.into(),
            cache: TtlCache::new(CACHE_TTL),
        })
    }

    fn readings_url(&self, yyyymmdd: &str) -> String {
        format!("{}{}.cfm", self.base_url, yyyymmdd)
    }

    fn daily_url_for(&self, date: &str) -> String {
        format!("{}?date={}", self.daily_url, date)
    }

    async fn get_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LectioError::Fetch {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LectioError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| LectioError::Fetch {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}

#[async_trait]
impl FetchReadings for UsccbClient {
    async fn fetch(&self, date: &str) -> Result<Fetched> {
        let yyyymmdd = date.replace('-', "");
        let cache_key = format!("usccb:{yyyymmdd}");

        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(date = %date, url = %hit.url, "readings cache hit");
            return Ok(hit);
        }

        let primary = self.readings_url(&yyyymmdd);
        let fetched = match self.get_html(&primary).await {
            Ok(html) => Fetched { html, url: primary },
            Err(err) => {
                let fallback = self.daily_url_for(date);
                warn!(error = %err, fallback = %fallback, "primary readings URL failed");
                let html = self.get_html(&fallback).await?;
                Fetched {
                    html,
                    url: fallback,
                }
            }
        };

        self.cache.insert(cache_key, fetched.clone());
        Ok(fetched)
    }
}

/// Readings source backed by a local HTML file (CLI `--input`).
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FetchReadings for FileSource {
    async fn fetch(&self, _date: &str) -> Result<Fetched> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        Ok(Fetched {
            html,
            url: format!("file://{}", self.path.display()),
        })
    }
}
