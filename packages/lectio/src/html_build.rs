//! HTML rendering: model-output cleanup, page wrapper, and the deterministic
//! booklet layout.

use htmlescape::{encode_attribute, encode_minimal};
use lazy_static::lazy_static;
use regex::Regex;

use crate::curator::ArtMeta;

lazy_static! {
    static ref LEADING_FENCE_RE: Regex = Regex::new(r"^```\w*\n?").unwrap();
    static ref VENEER_RE: Regex = Regex::new(r"(?i)^(here\s+(is|are)[^:]*:\s*)").unwrap();
}

/// Remove code fences and common wrappers from model output.
///
/// Strips a leading ```` ```lang ```` fence and its closing fence, drops a
/// leading "Here is/are ...:" phrase, and removes any stray fences inside.
pub fn strip_code_fences(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.trim().to_string();
    if s.starts_with("```") {
        s = LEADING_FENCE_RE.replace(&s, "").to_string();
        if let Some(idx) = s.rfind("```") {
            s = s[..idx].trim().to_string();
        }
    }

    let s = VENEER_RE.replace(&s, "").to_string();
    s.replace("```", "").trim().to_string()
}

/// Wrap `body` in a minimal HTML page with the given title.
pub fn build_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        encode_minimal(title),
        body
    )
}

/// One logical section of the booklet layout.
#[derive(Debug, Clone, Default)]
pub struct BookletSection {
    pub heading: String,
    pub reading: String,
    pub context: Option<String>,
    pub exegesis: Option<String>,
    pub questions: Vec<String>,
}

impl BookletSection {
    pub fn new(heading: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            reading: reading.into(),
            ..Default::default()
        }
    }
}

/// Headings that get a horizontal rule above them (except in first position).
fn needs_rule(heading: &str) -> bool {
    let key = heading.to_lowercase();
    key.starts_with("responsorial psalm")
        || key.starts_with("sequence")
        || key.starts_with("gospel")
}

/// Render the complete booklet document.
///
/// The markup is deterministic and does not depend on LLM-provided HTML;
/// every interpolated value is escaped.
pub fn build_booklet(
    date_str: &str,
    art: &ArtMeta,
    sections: &[BookletSection],
    final_reflection: &str,
    source_url: Option<&str>,
) -> String {
    let head = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Daily Readings &ndash; {date}</title>
  <style>
    :root{{--text:#222;--muted:#555;--rule:#ddd}}
    @page{{margin:18mm}}
    body{{margin:0;color:var(--text);}}
    .page{{padding:22px;max-width:680px;margin:0 auto;font-family: Georgia, 'Times New Roman', serif;font-size:15px;line-height:1.6}}
    .cover{{text-align:center;margin-bottom:24px}}
    .cover h1{{margin:0 0 4px;font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif;font-size:28px}}
    .cover h2{{margin:0 0 14px;font-weight:500;font-size:18px;color:var(--muted)}}
    .figurewrap{{margin:0 auto 8px}}
    .figurewrap img{{max-width:100%;height:auto;border-radius:3px}}
    .caption{{font-size:12px;color:var(--muted);margin-top:4px;font-style:italic}}
    main.content{{margin-top:12px}}
    h2{{font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif;font-size:20px;margin:22px 0 8px}}
    p{{margin:10px 0}}
    p.context{{color:#333;font-size:14px}}
    .reading{{white-space:pre-wrap;background:#fbfbfb;border:1px solid #eee;padding:10px 12px;border-radius:4px}}
    p.exegesis{{font-size:14px;color:#333}}
    ul.q-list{{margin:6px 0 14px 22px}}
    ul.q-list li{{margin:4px 0}}
    hr{{border:0;border-top:1px solid var(--rule);margin:18px 0}}
    section.final-reflect{{margin-top:20px}}
  </style>
</head>
<body>
  <div class="page">
    <section class="cover">
      <h1>Daily Readings</h1>
      <h2>{date}</h2>
      <div class="figurewrap">
        <img src="{img}" alt="Artwork">
      </div>
      <div class="caption">{title}<br>by {artist}, {year}</div>
    </section>
    <main class="content">
"#,
        date = encode_minimal(date_str),
        img = encode_attribute(&art.image_url),
        title = encode_minimal(&art.title),
        artist = encode_minimal(&art.artist),
        year = encode_minimal(&art.year),
    );

    let mut parts: Vec<String> = vec![head];

    for (i, section) in sections.iter().enumerate() {
        if i > 0 && needs_rule(&section.heading) {
            parts.push("      <hr>".to_string());
        }
        parts.push(format!(
            "      <h2>{}</h2>",
            encode_minimal(&section.heading)
        ));
        if let Some(context) = &section.context {
            parts.push(format!(
                "      <p class='context'><strong>Context:</strong> {}</p>",
                encode_minimal(&strip_code_fences(context))
            ));
        }
        parts.push(format!(
            "      <div class='reading'>{}</div>",
            encode_minimal(&strip_code_fences(&section.reading))
        ));
        if let Some(exegesis) = &section.exegesis {
            parts.push(format!(
                "      <p class='exegesis'><strong>Exegetical&nbsp;Note:</strong> {}</p>",
                encode_minimal(&strip_code_fences(exegesis))
            ));
        }
        if !section.questions.is_empty() {
            parts.push("      <p><strong>Reflection&nbsp;Questions:</strong></p>".to_string());
            parts.push("      <ul class='q-list'>".to_string());
            for question in &section.questions {
                parts.push(format!(
                    "        <li>{}</li>",
                    encode_minimal(&strip_code_fences(question))
                ));
            }
            parts.push("      </ul>".to_string());
        }
    }

    parts.push("      <hr>".to_string());
    parts.push("      <section class='final-reflect'>".to_string());
    parts.push("        <h2>Final Reflection</h2>".to_string());
    parts.push(format!(
        "        <div class='reading'>{}</div>",
        encode_minimal(&strip_code_fences(final_reflection))
    ));
    parts.push("      </section>".to_string());

    let footer_link = match source_url {
        Some(url) => format!(
            "<div>Readings source: <a href=\"{}\">{}</a></div>",
            encode_attribute(url),
            encode_minimal(url)
        ),
        None => String::new(),
    };
    parts.push(format!(
        r#"
    </main>
    <footer style='margin-top:28px;color:#666;font-size:12px;'>
      <div>Prepared with Lectio.</div>
      {footer_link}
    </footer>
  </div>
</body>
</html>
"#
    ));

    parts.join("\n")
}

/// Replace the cover placeholders in LLM-generated layout HTML.
pub fn inject_cover_metadata(html: &str, date_str: &str, art: &ArtMeta) -> String {
    html.replace("Current Date", date_str)
        .replace("Cover Title", &art.title)
        .replace("Cover Artist", &art.artist)
        .replace("Cover Year", &art.year)
        .replace("cid:cover.jpg", &art.image_url)
}
