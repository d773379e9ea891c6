// Document loading: resolve a directory to its supported files and extract
// their text into `Document`s.
//
// Files are read concurrently but come back in file-name order, so the
// same directory always produces the same load order. A file that cannot
// be read is logged and skipped; it never fails the whole load.

pub mod extractors;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::analysis::Document;
use extractors::{default_extractors, TextExtractor};

pub struct DocumentLoader {
    extractors: Vec<Box<dyn TextExtractor>>,
    concurrency: usize,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(default_extractors(), 8)
    }
}

impl DocumentLoader {
    pub fn new(extractors: Vec<Box<dyn TextExtractor>>, concurrency: usize) -> Self {
        Self {
            extractors,
            concurrency: concurrency.max(1),
        }
    }

    /// Load every supported file directly inside `dir` (not recursive).
    ///
    /// A missing directory yields an empty list and a warning.
    pub async fn load_directory(&self, dir: &Path) -> Result<Vec<Document>> {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Directory does not exist");
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => files.push(entry.path()),
                Ok(_) => {}
                Err(e) => {
                    warn!(file = %entry.path().display(), error = %e, "Cannot stat entry, skipping");
                }
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        info!(dir = %dir.display(), files = files.len(), "Found files");

        let loaded: Vec<Option<Document>> = stream::iter(files.iter().map(|path| self.load_file(path)))
            .buffered(self.concurrency)
            .collect()
            .await;

        Ok(loaded.into_iter().flatten().collect())
    }

    /// Load one file. `None` when no extractor accepts it or extraction fails.
    pub async fn load_file(&self, path: &Path) -> Option<Document> {
        let Some(extractor) = self.extractors.iter().find(|e| e.can_extract(path)) else {
            warn!(file = %path.display(), "No extractor for file, skipping");
            return None;
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match extractor.extract(path).await {
            Ok(text) => {
                debug!(file = %name, chars = text.chars().count(), "Loaded document");
                Some(Document::new(name, text))
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to load document");
                None
            }
        }
    }
}
