// Similarity algorithm trait and the closed set of algorithm identifiers.
//
// Every algorithm takes two raw texts and owns its own normalization. The
// set of algorithms is fixed: the factory maps each `AlgorithmKind` to
// exactly one implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// The closed enumeration of supported similarity algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlgorithmKind {
    CosineSimilarity,
    LongestCommonSubsequence,
    NGram,
}

impl AlgorithmKind {
    /// Every algorithm, in canonical order.
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::CosineSimilarity,
        AlgorithmKind::LongestCommonSubsequence,
        AlgorithmKind::NGram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::CosineSimilarity => "CosineSimilarity",
            AlgorithmKind::LongestCommonSubsequence => "LongestCommonSubsequence",
            AlgorithmKind::NGram => "NGram",
        }
    }

    /// One-line description for `plagcheck algorithms`.
    pub fn description(&self) -> &'static str {
        match self {
            AlgorithmKind::CosineSimilarity => "TF-IDF vectors over a pair-local vocabulary, cosine of the angle",
            AlgorithmKind::LongestCommonSubsequence => "longest common token subsequence over the mean length",
            AlgorithmKind::NGram => "Jaccard similarity of contiguous token n-gram sets",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cosinesimilarity" | "cosine" | "tfidf" => Ok(AlgorithmKind::CosineSimilarity),
            "longestcommonsubsequence" | "lcs" => Ok(AlgorithmKind::LongestCommonSubsequence),
            "ngram" | "n-gram" | "jaccard" => Ok(AlgorithmKind::NGram),
            _ => Err(AnalysisError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Trait for scoring the similarity of two raw texts.
///
/// Implementations normalize internally and return a score in [0, 1].
/// They hold no mutable state, so one instance can score many pairs from
/// several threads.
pub trait SimilarityAlgorithm: Send + Sync {
    /// Which identifier this implementation answers to.
    fn kind(&self) -> AlgorithmKind;

    /// Score two raw texts.
    fn calculate_similarity(&self, text_a: &str, text_b: &str) -> Result<f64>;
}
