use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::similarity::ngram::DEFAULT_NGRAM_SIZE;
use crate::similarity::AlgorithmFactory;
use crate::text::{Normalizer, StopWordList};

/// Output format for saved results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory analyzed when no --input is given
    pub input_dir: PathBuf,
    /// Presentation threshold in [0, 1]; the engine never reads it
    pub threshold: f64,
    pub ngram_size: usize,
    pub stop_words: StopWordList,
    /// Largest LCS table the aligner will fill before failing the comparison.
    /// Unset means no limit.
    pub lcs_max_cells: Option<usize>,
    /// Files read concurrently by the loader
    pub concurrency: usize,
    /// The similarity matrix is only printed up to this many documents
    pub matrix_max_documents: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("sample-data"),
            threshold: 0.3,
            ngram_size: DEFAULT_NGRAM_SIZE,
            stop_words: StopWordList::Curated,
            lcs_max_cells: None,
            concurrency: 8,
            matrix_max_documents: 15,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unset keys keep their
    /// defaults; unparseable values are an error, except the n-gram size,
    /// which falls back to the default like a non-positive size does.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let threshold = match get("PLAGCHECK_THRESHOLD") {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("PLAGCHECK_THRESHOLD={raw:?} is not a number: {e}"))?
                .clamp(0.0, 1.0),
            None => defaults.threshold,
        };

        let ngram_size = match get("PLAGCHECK_NGRAM_SIZE") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n > 0 => n as usize,
                _ => {
                    warn!(value = %raw, "Invalid PLAGCHECK_NGRAM_SIZE, using {DEFAULT_NGRAM_SIZE}");
                    DEFAULT_NGRAM_SIZE
                }
            },
            None => defaults.ngram_size,
        };

        let stop_words = match get("PLAGCHECK_STOP_WORDS") {
            Some(raw) => raw.parse::<StopWordList>().map_err(anyhow::Error::msg)?,
            None => defaults.stop_words,
        };

        Ok(Self {
            input_dir: get("PLAGCHECK_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            threshold,
            ngram_size,
            stop_words,
            lcs_max_cells: parse_positive(get("PLAGCHECK_LCS_MAX_CELLS"), "PLAGCHECK_LCS_MAX_CELLS")?
                .or(defaults.lcs_max_cells),
            concurrency: parse_positive(get("PLAGCHECK_CONCURRENCY"), "PLAGCHECK_CONCURRENCY")?
                .unwrap_or(defaults.concurrency),
            matrix_max_documents: parse_positive(
                get("PLAGCHECK_MATRIX_MAX_DOCS"),
                "PLAGCHECK_MATRIX_MAX_DOCS",
            )?
            .unwrap_or(defaults.matrix_max_documents),
        })
    }

    /// Algorithm factory configured from these settings.
    pub fn algorithm_factory(&self) -> AlgorithmFactory {
        AlgorithmFactory::new(Normalizer::new(self.stop_words))
            .with_ngram_size(self.ngram_size)
            .with_lcs_max_cells(self.lcs_max_cells)
    }
}

fn parse_positive(raw: Option<String>, key: &str) -> Result<Option<usize>> {
    match raw {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => anyhow::bail!("{key}={raw:?} must be a positive integer"),
        },
    }
}
