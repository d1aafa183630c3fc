//! Test doubles shared by unit and integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LectioError, Result};
use crate::pdf::PdfRenderer;
use crate::providers::{GenerateOptions, LlmProvider};
use crate::scrape::{FetchReadings, Fetched};

/// Provider returning a fixed sequence of completions and recording every
/// prompt it is asked.
pub struct ScriptedProvider {
    outputs: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(outputs: Vec<impl Into<String>>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(
        &self,
        _model: &str,
        prompt: &str,
        _options: GenerateOptions,
    ) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LectioError::Provider("scripted outputs exhausted".into()))
    }
}

/// Readings source returning one canned document for every date.
pub struct FixtureSource {
    pub html: String,
    pub url: String,
}

impl FixtureSource {
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FetchReadings for FixtureSource {
    async fn fetch(&self, _date: &str) -> Result<Fetched> {
        Ok(Fetched {
            html: self.html.clone(),
            url: self.url.clone(),
        })
    }
}

/// PDF renderer returning a canned document without launching anything.
pub struct StubPdf;

#[async_trait]
impl PdfRenderer for StubPdf {
    async fn render(&self, _html: &str) -> Result<Vec<u8>> {
        Ok(b"%PDF-1.4\n% stub document\n".to_vec())
    }
}
