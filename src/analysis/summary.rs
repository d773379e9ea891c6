// Per-pair aggregation of comparison records.
//
// Presentation and export work on pairs, not on individual records: one
// row per document pair with every algorithm's score, the maximum and the
// mean.

use serde::Serialize;
use uuid::Uuid;

use super::models::{AnalysisResult, ComparisonResult};
use crate::similarity::AlgorithmKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSummary {
    pub document_a_id: Uuid,
    pub document_b_id: Uuid,
    pub document_a_name: String,
    pub document_b_name: String,
    /// Scores in the order the algorithms ran
    pub scores: Vec<(AlgorithmKind, f64)>,
    pub max_similarity: f64,
    pub avg_similarity: f64,
}

impl PairSummary {
    fn start(first: &ComparisonResult) -> Self {
        Self {
            document_a_id: first.document_a_id,
            document_b_id: first.document_b_id,
            document_a_name: first.document_a_name.clone(),
            document_b_name: first.document_b_name.clone(),
            scores: Vec::new(),
            max_similarity: 0.0,
            avg_similarity: 0.0,
        }
    }

    fn finish(mut self) -> Self {
        let scores = self.scores.iter().map(|(_, s)| *s);
        self.max_similarity = scores.clone().fold(0.0, f64::max);
        self.avg_similarity = scores.sum::<f64>() / self.scores.len().max(1) as f64;
        self
    }

    pub fn exceeds(&self, threshold: f64) -> bool {
        self.max_similarity >= threshold
    }
}

/// Group records by ordered pair, keeping first-appearance order.
///
/// Records of one pair must be contiguous, as the analyzer emits them.
pub fn summarize_pairs(results: &[ComparisonResult]) -> Vec<PairSummary> {
    let mut pairs: Vec<PairSummary> = Vec::new();

    for result in results {
        let existing = pairs.last_mut().filter(|p| {
            p.document_a_id == result.document_a_id && p.document_b_id == result.document_b_id
        });
        match existing {
            Some(pair) => pair.scores.push((result.algorithm, result.similarity_score)),
            None => {
                let mut pair = PairSummary::start(result);
                pair.scores.push((result.algorithm, result.similarity_score));
                pairs.push(pair);
            }
        }
    }

    pairs.into_iter().map(PairSummary::finish).collect()
}

impl AnalysisResult {
    /// Pair summaries in enumeration order.
    pub fn pair_summaries(&self) -> Vec<PairSummary> {
        summarize_pairs(self.comparison_results())
    }

    /// Pairs whose best score reaches `threshold`, highest first.
    pub fn flagged_pairs(&self, threshold: f64) -> Vec<PairSummary> {
        let mut flagged: Vec<PairSummary> = self
            .pair_summaries()
            .into_iter()
            .filter(|p| p.exceeds(threshold))
            .collect();
        flagged.sort_by(|a, b| b.max_similarity.total_cmp(&a.max_similarity));
        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{Document, ProcessedDocument};
    use crate::text::Normalizer;

    fn processed(name: &str) -> ProcessedDocument {
        ProcessedDocument::from_document(&Document::new(name, ""), &Normalizer::default())
    }

    #[test]
    fn groups_scores_per_pair() {
        let (a, b, c) = (processed("a"), processed("b"), processed("c"));
        let results = vec![
            ComparisonResult::new(&a, &b, AlgorithmKind::CosineSimilarity, 0.2),
            ComparisonResult::new(&a, &b, AlgorithmKind::NGram, 0.6),
            ComparisonResult::new(&a, &c, AlgorithmKind::CosineSimilarity, 0.9),
            ComparisonResult::new(&a, &c, AlgorithmKind::NGram, 0.1),
        ];

        let pairs = summarize_pairs(&results);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].document_b_name, "b");
        assert_eq!(pairs[0].scores.len(), 2);
        assert!((pairs[0].max_similarity - 0.6).abs() < 1e-12);
        assert!((pairs[0].avg_similarity - 0.4).abs() < 1e-12);
        assert!((pairs[1].max_similarity - 0.9).abs() < 1e-12);
    }

    #[test]
    fn one_summary_per_pair_across_many_documents() {
        let docs: Vec<ProcessedDocument> = (0..40).map(|i| processed(&format!("d{i}"))).collect();
        let mut results = Vec::new();
        for i in 0..docs.len() {
            for j in i + 1..docs.len() {
                for kind in AlgorithmKind::ALL {
                    results.push(ComparisonResult::new(&docs[i], &docs[j], kind, 0.25));
                }
            }
        }

        let pairs = summarize_pairs(&results);
        assert_eq!(pairs.len(), 40 * 39 / 2);
        assert!(pairs.iter().all(|p| p.scores.len() == 3));
        assert_eq!(pairs[0].document_b_name, "d1");
        assert_eq!(pairs.last().unwrap().document_a_name, "d38");
    }

    #[test]
    fn flagged_pairs_are_filtered_and_sorted() {
        let (a, b, c) = (processed("a"), processed("b"), processed("c"));
        let results = vec![
            ComparisonResult::new(&a, &b, AlgorithmKind::NGram, 0.35),
            ComparisonResult::new(&a, &c, AlgorithmKind::NGram, 0.8),
            ComparisonResult::new(&b, &c, AlgorithmKind::NGram, 0.1),
        ];
        let result = AnalysisResult::new(vec![a, b, c], results);

        let flagged = result.flagged_pairs(0.3);
        let names: Vec<_> = flagged.iter().map(|p| p.document_b_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
    }
}
