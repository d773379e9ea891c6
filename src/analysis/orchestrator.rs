// Pairwise comparison orchestrator.
//
// For every unordered document pair (i < j, in load order) and every
// selected algorithm, score the pair's original texts and collect one
// record. Algorithms normalize for themselves; the preprocessing step here
// only produces the processed document list carried by the result.
//
// A failing algorithm costs one record, never the run. Cancellation is
// checked between pairs, never inside an algorithm.

use std::collections::HashSet;
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::{debug, error, info};

use super::models::{AnalysisResult, ComparisonResult, Document, ProcessedDocument};
use super::progress::{CancellationFlag, ProgressSink};
use crate::error::{AnalysisError, Result};
use crate::similarity::{AlgorithmFactory, AlgorithmKind, SimilarityAlgorithm};

/// Upper-triangular pair enumeration: (0,1), (0,2), ..., (1,2), ...
pub fn pair_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Number of records a complete run produces.
pub fn expected_comparisons(documents: usize, algorithms: usize) -> usize {
    documents * documents.saturating_sub(1) / 2 * algorithms
}

/// Stateless analysis driver. Each call is independent of every other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    factory: AlgorithmFactory,
}

impl Analyzer {
    pub fn new(factory: AlgorithmFactory) -> Self {
        Self { factory }
    }

    /// Compare every document pair with the selected algorithms.
    pub fn analyze(
        &self,
        documents: &[Document],
        algorithms: &[AlgorithmKind],
        progress: Option<&dyn ProgressSink>,
    ) -> Result<AnalysisResult> {
        let algorithms = self.build(algorithms);
        self.analyze_with(documents, &algorithms, progress, None)
    }

    /// Same as `analyze`, scoring pairs on the rayon thread pool.
    ///
    /// Records come back in the same order a sequential run produces, and
    /// progress is reported under a lock so fractions never go backwards.
    pub fn analyze_parallel(
        &self,
        documents: &[Document],
        algorithms: &[AlgorithmKind],
        progress: Option<&dyn ProgressSink>,
        cancel: Option<&CancellationFlag>,
    ) -> Result<AnalysisResult> {
        validate(documents)?;
        let algorithms = self.build(algorithms);

        info!(
            documents = documents.len(),
            algorithms = algorithms.len(),
            "Starting parallel analysis"
        );

        let processed = self.preprocess(documents);
        let pairs: Vec<(usize, usize)> = pair_indices(processed.len()).collect();
        let total = pairs.len() * algorithms.len();
        let completed = Mutex::new(0usize);

        let per_pair: Vec<Vec<ComparisonResult>> = pairs
            .par_iter()
            .map(|&(i, j)| {
                if cancel.is_some_and(CancellationFlag::is_cancelled) {
                    return Err(AnalysisError::Cancelled);
                }
                let records = score_pair(&processed[i], &processed[j], &algorithms, || {
                    if let Some(sink) = progress {
                        let mut done = completed.lock().unwrap_or_else(|e| e.into_inner());
                        *done += 1;
                        sink.report(*done as f64 / total as f64);
                    }
                });
                Ok(records)
            })
            .collect::<Result<_>>()?;

        if total == 0 {
            if let Some(sink) = progress {
                sink.report(1.0);
            }
        }

        let results: Vec<ComparisonResult> = per_pair.into_iter().flatten().collect();
        info!(comparisons = results.len(), "Parallel analysis completed");
        Ok(AnalysisResult::new(processed, results))
    }

    /// Run `analyze` on the blocking thread pool, honoring `cancel`
    /// between pairs. A cancelled run returns `AnalysisError::Cancelled`.
    pub async fn analyze_async(
        &self,
        documents: Vec<Document>,
        algorithms: Vec<AlgorithmKind>,
        progress: Option<Box<dyn ProgressSink>>,
        cancel: CancellationFlag,
    ) -> Result<AnalysisResult> {
        let analyzer = *self;
        let task = tokio::task::spawn_blocking(move || {
            let algorithms = analyzer.build(&algorithms);
            analyzer.analyze_with(&documents, &algorithms, progress.as_deref(), Some(&cancel))
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(AnalysisError::Cancelled),
        }
    }

    /// Core sequential loop over already-built algorithm instances.
    pub fn analyze_with(
        &self,
        documents: &[Document],
        algorithms: &[Box<dyn SimilarityAlgorithm>],
        progress: Option<&dyn ProgressSink>,
        cancel: Option<&CancellationFlag>,
    ) -> Result<AnalysisResult> {
        validate(documents)?;

        info!(
            documents = documents.len(),
            algorithms = algorithms.len(),
            "Starting plagiarism analysis"
        );

        let processed = self.preprocess(documents);
        let total = expected_comparisons(processed.len(), algorithms.len());
        let mut completed = 0usize;
        let mut results = Vec::with_capacity(total);

        for (i, j) in pair_indices(processed.len()) {
            if cancel.is_some_and(CancellationFlag::is_cancelled) {
                info!(completed, total, "Analysis cancelled");
                return Err(AnalysisError::Cancelled);
            }

            let records = score_pair(&processed[i], &processed[j], algorithms, || {
                completed += 1;
                if let Some(sink) = progress {
                    sink.report(completed as f64 / total as f64);
                }
            });
            results.extend(records);
        }

        if total == 0 {
            if let Some(sink) = progress {
                sink.report(1.0);
            }
        }

        info!(comparisons = results.len(), "Analysis completed");
        Ok(AnalysisResult::new(processed, results))
    }

    fn build(&self, kinds: &[AlgorithmKind]) -> Vec<Box<dyn SimilarityAlgorithm>> {
        kinds.iter().map(|&k| self.factory.create(k)).collect()
    }

    fn preprocess(&self, documents: &[Document]) -> Vec<ProcessedDocument> {
        let normalizer = self.factory.normalizer();
        documents
            .iter()
            .map(|document| {
                let processed = ProcessedDocument::from_document(document, &normalizer);
                debug!(
                    document = %document.name,
                    original_len = document.text.chars().count(),
                    tokens = processed.tokens.len(),
                    "Document processed"
                );
                processed
            })
            .collect()
    }
}

/// Reject inputs the result index could not represent.
fn validate(documents: &[Document]) -> Result<()> {
    let mut seen = HashSet::with_capacity(documents.len());
    for document in documents {
        if !seen.insert(document.id) {
            return Err(AnalysisError::InvalidInput(format!(
                "duplicate document id {} ({})",
                document.id, document.name
            )));
        }
    }
    Ok(())
}

/// Score one pair with every algorithm, calling `tick` after each attempt.
fn score_pair(
    a: &ProcessedDocument,
    b: &ProcessedDocument,
    algorithms: &[Box<dyn SimilarityAlgorithm>],
    mut tick: impl FnMut(),
) -> Vec<ComparisonResult> {
    debug!(a = %a.name, b = %b.name, "Comparing");
    let mut records = Vec::with_capacity(algorithms.len());

    for algorithm in algorithms {
        let kind = algorithm.kind();
        let outcome = algorithm
            .calculate_similarity(&a.original_text, &b.original_text)
            .and_then(|score| {
                if score.is_finite() {
                    Ok(score)
                } else {
                    Err(AnalysisError::algorithm_failure(kind, format!("non-finite score {score}")))
                }
            });

        match outcome {
            Ok(score) => {
                debug!(algorithm = %kind, similarity = format!("{:.4}", score), "Scored");
                records.push(ComparisonResult::new(a, b, kind, score));
            }
            Err(e) => {
                error!(
                    algorithm = %kind,
                    a = %a.name,
                    b = %b.name,
                    error = %e,
                    "Comparison failed, skipping"
                );
            }
        }
        tick();
    }

    records
}
