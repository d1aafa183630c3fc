//! Lectio: a daily-readings curation pipeline.
//!
//! For a given date the pipeline fetches the USCCB readings page, parses it
//! into liturgical sections, asks an LLM provider for a reflection and for
//! cover-art metadata, and renders a printable booklet as HTML or PDF. A
//! small axum server fronts the pipeline; the `lectio` binary runs either the
//! server (`--serve`) or a one-shot generation to stdout.
//!
//! The LLM provider is pluggable: by default an offline fake answers every
//! prompt, so the whole crate (tests included) works without network access
//! or credentials. Setting `LLM_PROVIDER=ollama` switches to a local Ollama
//! server via its OpenAI-compatible API.

pub mod cache;
pub mod config;
pub mod curator;
pub mod error;
pub mod html_build;
pub mod parse;
pub mod pdf;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod scrape;
pub mod server;
pub mod testing;

pub use config::Config;
pub use error::{LectioError, Result};
