// Per-format text extraction.
//
// Each extractor claims a set of file extensions. The loader asks them in
// order and uses the first that accepts a file.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Turns one file into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Whether this extractor handles the file (decided by extension).
    fn can_extract(&self, path: &Path) -> bool;

    async fn extract(&self, path: &Path) -> Result<String>;
}

fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| accepted.iter().any(|a| e.eq_ignore_ascii_case(a)))
}

/// Plain text and Markdown files, read as UTF-8.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "md"])
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read text file: {}", path.display()))
    }
}

/// PDF files, via the pure-Rust `pdf-extract` crate.
///
/// Only the text layer is read; scanned PDFs come back (nearly) empty.
#[cfg(feature = "pdf")]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf")]
#[async_trait]
impl TextExtractor for PdfTextExtractor {
    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, &["pdf"])
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read PDF file: {}", path.display()))?;

        // Parsing is CPU-bound, keep it off the async workers
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("spawn_blocking panicked")?
            .map_err(|e| anyhow::anyhow!("Failed to extract text from PDF {}: {e}", path.display()))?;

        Ok(text)
    }
}

/// The extractors compiled into this build, in priority order.
pub fn default_extractors() -> Vec<Box<dyn TextExtractor>> {
    #[allow(unused_mut)]
    let mut extractors: Vec<Box<dyn TextExtractor>> = vec![Box::new(PlainTextExtractor)];
    #[cfg(feature = "pdf")]
    extractors.push(Box::new(PdfTextExtractor));
    extractors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_claims_txt_and_md_case_insensitively() {
        let extractor = PlainTextExtractor;
        assert!(extractor.can_extract(Path::new("essay.txt")));
        assert!(extractor.can_extract(Path::new("NOTES.MD")));
        assert!(!extractor.can_extract(Path::new("paper.pdf")));
        assert!(!extractor.can_extract(Path::new("README")));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_claims_pdf_only() {
        let extractor = PdfTextExtractor;
        assert!(extractor.can_extract(Path::new("paper.PDF")));
        assert!(!extractor.can_extract(Path::new("paper.txt")));
    }
}
