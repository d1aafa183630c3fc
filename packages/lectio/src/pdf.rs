//! PDF rendering of generated documents.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{LectioError, Result};

/// Renders an HTML document to PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Renderer shelling out to the `wkhtmltopdf` binary, piping HTML on stdin
/// and reading the PDF from stdout.
pub struct Wkhtmltopdf {
    binary: String,
}

impl Wkhtmltopdf {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for Wkhtmltopdf {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

#[async_trait]
impl PdfRenderer for Wkhtmltopdf {
    async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.binary)
            .args(["--quiet", "--encoding", "utf-8", "-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LectioError::Pdf(format!("failed to launch {}: {e}", self.binary)))?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| LectioError::Pdf(format!("failed to write input: {e}")))?;
        }
        drop(child.stdin.take());

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| LectioError::Pdf(format!("{} did not finish: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LectioError::Pdf(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        if !output.stdout.starts_with(b"%PDF") {
            return Err(LectioError::Pdf(format!(
                "{} did not produce a PDF document",
                self.binary
            )));
        }

        debug!(bytes = output.stdout.len(), "rendered PDF");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_pdf_error() {
        let renderer = Wkhtmltopdf::new("definitely-not-a-real-binary");
        match renderer.render("<html></html>").await {
            Err(LectioError::Pdf(msg)) => assert!(msg.contains("failed to launch")),
            other => panic!("expected pdf error, got {other:?}"),
        }
    }
}
