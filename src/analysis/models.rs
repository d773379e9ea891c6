// Data models for an analysis run.
//
// `Document` is what a loader produces. `ProcessedDocument` is the
// normalized copy the analyzer builds from it; the original is never
// mutated. `AnalysisResult` is an immutable snapshot with a lookup index
// built once at construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::similarity::AlgorithmKind;
use crate::text::Normalizer;

/// A document as loaded: identity, display name and raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub text: String,
}

impl Document {
    /// Create a document with a fresh random identity.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, text)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A document with its derived normalization filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub id: Uuid,
    pub name: String,
    pub original_text: String,
    /// Output of `Normalizer::preprocess`
    pub normalized_text: String,
    /// Lemmas after tokenization, stop-word removal and stemming
    pub tokens: Vec<String>,
}

impl ProcessedDocument {
    pub fn from_document(document: &Document, normalizer: &Normalizer) -> Self {
        let normalized_text = normalizer.preprocess(&document.text);
        let tokens = normalizer.filter_stopwords_and_stem(&normalizer.tokenize(&normalized_text));
        Self {
            id: document.id,
            name: document.name.clone(),
            original_text: document.text.clone(),
            normalized_text,
            tokens,
        }
    }
}

/// One algorithm's score for one ordered document pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub document_a_id: Uuid,
    pub document_b_id: Uuid,
    pub document_a_name: String,
    pub document_b_name: String,
    pub algorithm: AlgorithmKind,
    /// Always within [0, 1]
    pub similarity_score: f64,
}

impl ComparisonResult {
    /// Build a record for `(a, b)`, clamping the score into [0, 1].
    pub fn new(
        a: &ProcessedDocument,
        b: &ProcessedDocument,
        algorithm: AlgorithmKind,
        score: f64,
    ) -> Self {
        Self {
            document_a_id: a.id,
            document_b_id: b.id,
            document_a_name: a.name.clone(),
            document_b_name: b.name.clone(),
            algorithm,
            similarity_score: score.clamp(0.0, 1.0),
        }
    }
}

/// Immutable result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    id: Uuid,
    timestamp: DateTime<Utc>,
    /// In load order, not display order
    documents: Vec<ProcessedDocument>,
    comparison_results: Vec<ComparisonResult>,
    /// (a, b) -> index of the highest-scoring record for that ordered pair
    #[serde(skip)]
    pair_index: HashMap<(Uuid, Uuid), usize>,
    /// (a, b, algorithm) -> index of that algorithm's record
    #[serde(skip)]
    algorithm_index: HashMap<(Uuid, Uuid, AlgorithmKind), usize>,
}

impl AnalysisResult {
    /// Wrap documents and records, assigning a new id and the current time.
    pub fn new(documents: Vec<ProcessedDocument>, comparison_results: Vec<ComparisonResult>) -> Self {
        let mut pair_index: HashMap<(Uuid, Uuid), usize> = HashMap::new();
        let mut algorithm_index = HashMap::new();

        for (i, result) in comparison_results.iter().enumerate() {
            let key = (result.document_a_id, result.document_b_id);
            algorithm_index.insert((key.0, key.1, result.algorithm), i);
            pair_index
                .entry(key)
                .and_modify(|best| {
                    if result.similarity_score > comparison_results[*best].similarity_score {
                        *best = i;
                    }
                })
                .or_insert(i);
        }

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            documents,
            comparison_results,
            pair_index,
            algorithm_index,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn documents(&self) -> &[ProcessedDocument] {
        &self.documents
    }

    pub fn comparison_results(&self) -> &[ComparisonResult] {
        &self.comparison_results
    }

    /// The stored record for the ordered pair `(a, b)` with the highest score.
    pub fn comparison(&self, a: Uuid, b: Uuid) -> Option<&ComparisonResult> {
        self.pair_index.get(&(a, b)).map(|&i| &self.comparison_results[i])
    }

    /// Score for the ordered pair `(a, b)`. The lookup is not symmetric:
    /// the reverse of a stored pair, a self pair, or an unknown pair is 0.0.
    pub fn get_similarity(&self, a: Uuid, b: Uuid) -> f64 {
        self.comparison(a, b).map_or(0.0, |r| r.similarity_score)
    }

    /// One algorithm's score for `(a, b)`. `None` means no score is
    /// available, which is not the same as a zero score.
    pub fn get_algorithm_similarity(&self, a: Uuid, b: Uuid, algorithm: AlgorithmKind) -> Option<f64> {
        self.algorithm_index
            .get(&(a, b, algorithm))
            .map(|&i| self.comparison_results[i].similarity_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(name: &str) -> ProcessedDocument {
        ProcessedDocument::from_document(&Document::new(name, "text"), &Normalizer::default())
    }

    #[test]
    fn processing_copies_identity_and_fills_derived_fields() {
        let doc = Document::new("a.txt", "The Cats, sleeping!");
        let p = ProcessedDocument::from_document(&doc, &Normalizer::default());
        assert_eq!(p.id, doc.id);
        assert_eq!(p.name, "a.txt");
        assert_eq!(p.original_text, "The Cats, sleeping!");
        assert_eq!(p.normalized_text, "the cats sleeping");
        assert_eq!(p.tokens, vec!["cat".to_string(), "sleep".to_string()]);
    }

    #[test]
    fn comparison_result_clamps_score() {
        let (a, b) = (processed("a"), processed("b"));
        assert_eq!(ComparisonResult::new(&a, &b, AlgorithmKind::NGram, 1.7).similarity_score, 1.0);
        assert_eq!(ComparisonResult::new(&a, &b, AlgorithmKind::NGram, -0.2).similarity_score, 0.0);
    }

    #[test]
    fn lookup_is_directional_and_keeps_the_maximum() {
        let (a, b) = (processed("a"), processed("b"));
        let results = vec![
            ComparisonResult::new(&a, &b, AlgorithmKind::CosineSimilarity, 0.4),
            ComparisonResult::new(&a, &b, AlgorithmKind::NGram, 0.7),
            ComparisonResult::new(&a, &b, AlgorithmKind::LongestCommonSubsequence, 0.5),
        ];
        let (a_id, b_id) = (a.id, b.id);
        let result = AnalysisResult::new(vec![a, b], results);

        assert_eq!(result.get_similarity(a_id, b_id), 0.7);
        assert_eq!(result.get_similarity(b_id, a_id), 0.0);
        assert_eq!(result.get_similarity(a_id, a_id), 0.0);
        assert_eq!(result.get_similarity(a_id, Uuid::new_v4()), 0.0);
        assert_eq!(
            result.get_algorithm_similarity(a_id, b_id, AlgorithmKind::CosineSimilarity),
            Some(0.4)
        );
        assert_eq!(
            result.get_algorithm_similarity(b_id, a_id, AlgorithmKind::CosineSimilarity),
            None
        );
    }

    #[test]
    fn serializes_without_the_index() {
        let result = AnalysisResult::new(vec![processed("a")], vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("id").is_some());
        assert!(json.get("timestamp").is_some());
        assert!(json.get("documents").unwrap().is_array());
        assert!(json.get("comparison_results").unwrap().is_array());
        assert!(json.get("pair_index").is_none());
    }
}
