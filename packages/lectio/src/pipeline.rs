//! The generation pipeline: parse readings, call the provider, render HTML.

use tracing::{debug, info};

use crate::config::Config;
use crate::curator::{self, ArtMeta};
use crate::error::{LectioError, Result};
use crate::html_build::{self, BookletSection};
use crate::parse::{self, Section};
use crate::prompts;
use crate::providers::{GenerateOptions, LlmProvider};

/// Everything the renderers need for one date.
#[derive(Debug, Clone)]
pub struct Curated {
    pub title: Option<String>,
    pub date: String,
    pub art: ArtMeta,
    pub sections: Vec<Section>,
    pub reflection: String,
    pub source_url: Option<String>,
}

/// Parse the document and run the reflection and art model calls.
pub async fn curate_date(
    html: &str,
    date_str: &str,
    source_url: Option<&str>,
    provider: &dyn LlmProvider,
    config: &Config,
) -> Result<Curated> {
    let title = parse::extract_title(html);
    let sections = parse::extract_sections(html);
    let readings_block = parse::build_readings_block(&sections);
    if readings_block.is_empty() {
        return Err(LectioError::EmptyReadings);
    }
    debug!(
        sections = sections.len(),
        chars = readings_block.len(),
        "parsed readings"
    );

    let options = GenerateOptions::default();

    let reflection = provider
        .generate(
            &config.models.reflection,
            &prompts::make_prompt1(&readings_block),
            options,
        )
        .await?;

    let art_raw = provider
        .generate(
            &config.models.art,
            &prompts::make_prompt2(date_str, &readings_block),
            options,
        )
        .await?;
    let mut art = curator::parse_art_json(&art_raw)?;

    let http = reqwest::Client::new();
    art.image_url = curator::ensure_upload_wikimedia_url(&http, &art.image_url).await;

    info!(date = %date_str, art_title = %art.title, "curated readings");

    Ok(Curated {
        title,
        date: date_str.to_string(),
        art,
        sections,
        reflection,
        source_url: source_url.map(str::to_string),
    })
}

fn to_booklet_section(section: &Section) -> BookletSection {
    let reading = match (section.citation.is_empty(), section.text.is_empty()) {
        (false, false) => format!("{}\n\n{}", section.citation, section.text),
        (false, true) => section.citation.clone(),
        _ => section.text.clone(),
    };
    BookletSection::new(section.label.clone(), reading)
}

/// Generate the deterministic booklet document for one date.
pub async fn run(
    html: &str,
    date_str: &str,
    source_url: Option<&str>,
    provider: &dyn LlmProvider,
    config: &Config,
) -> Result<String> {
    let curated = curate_date(html, date_str, source_url, provider, config).await?;
    let sections: Vec<BookletSection> = curated.sections.iter().map(to_booklet_section).collect();

    Ok(html_build::build_booklet(
        &curated.date,
        &curated.art,
        &sections,
        &curated.reflection,
        curated.source_url.as_deref(),
    ))
}

/// Generate a page via the legacy LLM-layout path.
///
/// A third model call lays out the page from the stitched blocks; cover
/// metadata is injected into its output by placeholder replacement.
pub async fn run_llm_layout(
    html: &str,
    date_str: &str,
    provider: &dyn LlmProvider,
    config: &Config,
) -> Result<String> {
    let curated = curate_date(html, date_str, None, provider, config).await?;
    let art = &curated.art;

    let art_block = curator::curate(&[
        art.title.as_str(),
        art.artist.as_str(),
        art.year.as_str(),
        art.image_url.as_str(),
    ]);
    let raw_blocks = curator::curate(&[curated.reflection.as_str(), art_block.as_str()]);

    let layout = provider
        .generate(
            &config.models.html,
            &prompts::make_prompt3(date_str, &raw_blocks),
            GenerateOptions::default(),
        )
        .await?;

    let injected = html_build::inject_cover_metadata(
        &html_build::strip_code_fences(&layout),
        date_str,
        art,
    );

    let title = curated
        .title
        .unwrap_or_else(|| format!("Daily Readings \u{2013} {date_str}"));
    Ok(html_build::build_page(&title, &injected))
}
