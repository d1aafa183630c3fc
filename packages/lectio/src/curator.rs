//! Content curation: stitching blocks, art metadata, and URL normalization.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LectioError, Result};
use crate::html_build::strip_code_fences;

/// Cover-art metadata selected by the art model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub image_url: String,
}

/// Order-preserving dedup.
pub fn unique<T: Eq + std::hash::Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Stitch parts into one block: trim, drop empties, dedup, join with newlines.
pub fn curate<S: AsRef<str>>(parts: &[S]) -> String {
    let cleaned: Vec<String> = parts
        .iter()
        .map(|part| part.as_ref().trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();
    unique(cleaned).join("\n")
}

/// Parse the art model's JSON answer into [`ArtMeta`].
///
/// Tolerates code fences and prose around the object; missing fields default
/// to empty strings.
pub fn parse_art_json(raw: &str) -> Result<ArtMeta> {
    let cleaned = strip_code_fences(raw);
    let start = cleaned.find('{');
    let end = cleaned.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => {
            return Err(LectioError::ArtParse(
                "no JSON object in model output".to_string(),
            ))
        }
    };

    serde_json::from_str(json).map_err(|e| LectioError::ArtParse(e.to_string()))
}

/// Normalize an artwork URL to a direct file URL.
///
/// Direct `upload.wikimedia.org` URLs are returned unchanged without any
/// network I/O. Anything else (Commons `Special:FilePath` links, page URLs)
/// is resolved by following redirects with a HEAD request, falling back to
/// GET where HEAD is not supported. If resolution fails the original URL is
/// returned.
pub async fn ensure_upload_wikimedia_url(client: &reqwest::Client, raw_url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw_url) {
        if parsed.host_str() == Some("upload.wikimedia.org") {
            return raw_url.to_string();
        }
    }

    match client.head(raw_url).send().await {
        Ok(response) if response.status().is_success() => {
            let resolved = response.url().to_string();
            debug!(from = %raw_url, to = %resolved, "resolved art URL via HEAD");
            return resolved;
        }
        Ok(response) => {
            debug!(status = %response.status(), url = %raw_url, "HEAD not usable for art URL");
        }
        Err(err) => {
            debug!(error = %err, url = %raw_url, "HEAD failed for art URL");
        }
    }

    match client.get(raw_url).send().await {
        Ok(response) if response.status().is_success() => {
            let resolved = response.url().to_string();
            debug!(from = %raw_url, to = %resolved, "resolved art URL via GET");
            resolved
        }
        Ok(response) => {
            warn!(status = %response.status(), url = %raw_url, "could not resolve art URL");
            raw_url.to_string()
        }
        Err(err) => {
            warn!(error = %err, url = %raw_url, "could not resolve art URL");
            raw_url.to_string()
        }
    }
}
