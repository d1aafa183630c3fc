//! Prompt templates for the three pipeline calls.
//!
//! Templates use `<<PLACEHOLDER>>` markers; the `make_*` helpers substitute
//! them. The offline fake provider keys on distinctive phrases in these
//! templates ("art curator", "Build an HTML fragment"), so those phrases are
//! load-bearing.

/// Readings text inserted into the art prompt is capped at this many chars.
const MAX_READINGS_CHARS: usize = 8000;

/// Prompt for the written reflection on the readings.
pub const PROMPT_1: &str = r#"You are a thoughtful spiritual writer preparing a short reflection
on the daily Mass readings for a small parish bulletin.

Write two or three paragraphs of plain prose that draw out one central
theme connecting the readings. Be concrete and pastoral; do not retell
the readings line by line, do not address the reader as "you all", and
do not add headings or markup of any kind.

Readings:
<<READINGS>>"#;

/// Prompt for cover-art selection; the model answers with a JSON object.
pub const PROMPT_2: &str = r#"You are an art curator choosing one public-domain artwork to serve
as the cover image for a booklet of the daily Mass readings of <<DATE>>.

Choose a painting whose subject resonates with the readings below. Answer
with a single JSON object and nothing else:

{"title": "...", "artist": "...", "year": "...", "image_url": "..."}

The image_url must be a direct https://upload.wikimedia.org/... file URL
for the artwork (not a Wikipedia or Commons page URL).

Readings:
<<READINGS>>"#;

/// Prompt for the legacy LLM-generated page layout.
pub const PROMPT_3: &str = r#"Build an HTML fragment laying out a printable booklet of the daily
readings for <<DATE>>.

Use only semantic tags (section, h2, p, ul, li) and no scripts or external
stylesheets. Begin with a cover section containing the literal placeholder
strings Current Date, Cover Title, Cover Artist and Cover Year, and an img
tag whose src is cid:cover.jpg; they are replaced after generation. Then
lay out each content block in order. Output raw HTML with no code fences.

Content blocks:
<<RAW_BLOCKS>>"#;

/// Build the reflection prompt for a readings block.
pub fn make_prompt1(readings: &str) -> String {
    PROMPT_1.replace("<<READINGS>>", readings)
}

/// Build the art-curation prompt, truncating oversized readings.
pub fn make_prompt2(date_str: &str, readings: &str) -> String {
    let truncated: String = readings.chars().take(MAX_READINGS_CHARS).collect();
    PROMPT_2
        .replace("<<DATE>>", date_str)
        .replace("<<READINGS>>", &truncated)
}

/// Build the HTML-layout prompt from stitched content blocks.
pub fn make_prompt3(date_str: &str, raw_blocks: &str) -> String {
    PROMPT_3
        .replace("<<DATE>>", date_str)
        .replace("<<RAW_BLOCKS>>", raw_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_prompt1_inserts_readings() {
        let block = "First reading";
        let result = make_prompt1(block);
        assert!(result.contains(block));
        assert!(!result.contains("<<READINGS>>"));
    }

    #[test]
    fn make_prompt2_truncates_and_fills() {
        let long_text = "R".repeat(9000);
        let result = make_prompt2("2024-05-18", &long_text);
        assert!(result.contains("2024-05-18"));
        assert!(!result.contains("<<DATE>>"));
        assert!(!result.contains("<<READINGS>>"));
        assert!(result.contains(&"R".repeat(8000)));
        assert!(!result.contains(&"R".repeat(8001)));
    }

    #[test]
    fn make_prompt3_inserts_blocks() {
        let result = make_prompt3("2024-05-18", "<p>Content</p>");
        assert!(result.contains("2024-05-18"));
        assert!(result.contains("<p>Content</p>"));
        assert!(!result.contains("<<DATE>>"));
        assert!(!result.contains("<<RAW_BLOCKS>>"));
    }

    #[test]
    fn fake_provider_markers_present() {
        assert!(PROMPT_2.contains("art curator"));
        assert!(PROMPT_3.contains("Build an HTML fragment"));
    }

    #[test]
    fn no_smart_apostrophes_in_templates() {
        for template in [PROMPT_1, PROMPT_2, PROMPT_3] {
            assert!(!template.contains('\u{2019}'));
        }
    }
}
