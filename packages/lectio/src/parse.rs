//! Parsing of USCCB daily-readings HTML into liturgical sections.
//!
//! The section splitter works on a line-oriented view of the document:
//! block-level tags become newlines, remaining tags are stripped, and a
//! heading scan groups lines into sections. This deliberately tolerates the
//! markup churn of the source site; only headings and ordering matter.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    // Section headings as they appear on the readings page
    static ref HEADING_RE: Regex = Regex::new(
        r"(?i)^(reading\s*(\d+|[iv]+)\b|responsorial\s+psalm|alleluia|gospel\b|sequence\b)"
    )
    .unwrap();

    // Scripture citations look like "Mt 17:14-20"
    static ref CITATION_RE: Regex = Regex::new(r"\d+:\d+").unwrap();

    static ref SCRIPT_RE: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    static ref STYLE_RE: Regex = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    static ref BR_RE: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref BLOCK_CLOSE_RE: Regex = Regex::new(r"(?i)</(p|div|h[1-6]|li|tr)>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// One liturgical section from the readings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub citation: String,
    pub text: String,
    pub is_psalm: bool,
    pub is_gospel: bool,
}

/// Text of the document's `<title>` element, if present.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Reduce `html` to trimmed, non-empty textual lines.
fn html_to_lines(html: &str) -> Vec<String> {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = BR_RE.replace_all(&text, "\n");
    let text = BLOCK_CLOSE_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| htmlescape::decode_html(line).unwrap_or_else(|_| line.to_string()))
        .collect()
}

/// Does this line resemble a scripture citation?
fn looks_like_citation(line: &str) -> bool {
    CITATION_RE.is_match(line)
}

/// Split the document into [`Section`]s.
///
/// A heading line opens a section; the first line after it is taken as the
/// citation (whether or not it looks like one), and the rest of the lines up
/// to the next heading form the body.
pub fn extract_sections(html: &str) -> Vec<Section> {
    let lines = html_to_lines(html);
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut body_lines: Vec<String> = Vec::new();
    let mut expecting_citation = false;

    for line in lines {
        let lower = line.to_lowercase();
        if HEADING_RE.is_match(&lower) {
            if let Some(mut section) = current.take() {
                section.text = body_lines.join("\n").trim().to_string();
                sections.push(section);
            }

            current = Some(Section {
                label: line,
                citation: String::new(),
                text: String::new(),
                is_psalm: lower.starts_with("responsorial psalm"),
                is_gospel: lower.starts_with("gospel"),
            });
            body_lines.clear();
            expecting_citation = true;
            continue;
        }

        if let Some(section) = current.as_mut() {
            if expecting_citation && (looks_like_citation(&line) || section.citation.is_empty()) {
                section.citation = line;
                expecting_citation = false;
                continue;
            }
            body_lines.push(line);
        }
    }

    if let Some(mut section) = current.take() {
        section.text = body_lines.join("\n").trim().to_string();
        sections.push(section);
    }

    sections
}

/// Flatten sections into a single readings block.
///
/// Each section becomes a `label\ncitation\ntext` paragraph; paragraphs are
/// separated by blank lines.
pub fn build_readings_block(sections: &[Section]) -> String {
    let blocks: Vec<String> = sections
        .iter()
        .map(|section| {
            let mut lines = vec![section.label.as_str()];
            if !section.citation.is_empty() {
                lines.push(&section.citation);
            }
            if !section.text.is_empty() {
                lines.push(&section.text);
            }
            lines.join("\n")
        })
        .collect();

    blocks.join("\n\n").trim().to_string()
}

/// Parse `html` and return the flattened readings block.
pub fn parse_readings(html: &str) -> String {
    build_readings_block(&extract_sections(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head><title>Sample Title</title></head><body>
        <h2>Reading 1</h2>
        <div><a href="/bible/dt/6">Deuteronomy 6:4-13</a></div>
        <p>Moses said to the people:<br/>"Hear, O Israel!"</p>
        <h2>Responsorial Psalm</h2>
        <div>Psalm 18:2-3a, 3bc-4, 47, 51</div>
        <p>R. I love you, Lord, my strength.</p>
        <h2>Gospel</h2>
        <div>Matthew 17:14-20</div>
        <p>A man came up to Jesus and knelt down.</p>
    </body></html>"#;

    #[test]
    fn extracts_title() {
        assert_eq!(extract_title(SAMPLE), Some("Sample Title".to_string()));
        assert_eq!(extract_title("<p>no title</p>"), None);
    }

    #[test]
    fn extracts_labeled_sections() {
        let sections = extract_sections(SAMPLE);
        let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Reading 1", "Responsorial Psalm", "Gospel"]);

        assert_eq!(sections[0].citation, "Deuteronomy 6:4-13");
        assert!(sections[0].text.contains("Hear, O Israel!"));
        assert!(!sections[0].is_psalm);
        assert!(sections[1].is_psalm);
        assert!(sections[2].is_gospel);
        assert_eq!(sections[2].citation, "Matthew 17:14-20");
    }

    #[test]
    fn first_line_is_citation_even_without_verse_numbers() {
        let html = "<h2>Gospel</h2><p>According to Matthew</p><p>Body text</p>";
        let sections = extract_sections(html);
        assert_eq!(sections[0].citation, "According to Matthew");
        assert_eq!(sections[0].text, "Body text");
    }

    #[test]
    fn heading_with_no_content_yields_empty_fields() {
        let sections = extract_sections("<h2>Reading 1</h2>");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].citation.is_empty());
        assert!(sections[0].text.is_empty());
    }

    #[test]
    fn no_headings_yields_no_sections() {
        assert!(extract_sections("<p>Just some prose.</p>").is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn readings_block_joins_sections_with_blank_lines() {
        let block = parse_readings(SAMPLE);
        assert!(block.starts_with("Reading 1\nDeuteronomy 6:4-13"));
        assert!(block.contains("\n\nResponsorial Psalm\n"));
        assert!(block.contains("\n\nGospel\nMatthew 17:14-20"));
    }

    #[test]
    fn decodes_entities_in_lines() {
        let html = "<h2>Reading 1</h2><p>Genesis 1:1</p><p>heaven &amp; earth</p>";
        let sections = extract_sections(html);
        assert_eq!(sections[0].text, "heaven & earth");
    }
}
