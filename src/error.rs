// Error taxonomy for the analysis engine.
//
// Application layers (loader, export, CLI) stay on anyhow. The engine
// returns typed errors so callers can tell a rejected request apart from
// a cancelled run, and a per-pair failure apart from either.

use thiserror::Error;

use crate::similarity::traits::AlgorithmKind;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request itself is malformed. Nothing was computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An algorithm identifier outside the closed set was requested.
    #[error("unknown similarity algorithm: {0:?} (expected CosineSimilarity, LongestCommonSubsequence or NGram)")]
    UnknownAlgorithm(String),

    /// A single algorithm could not score a single pair.
    #[error("{algorithm} failed: {reason}")]
    AlgorithmFailure {
        algorithm: AlgorithmKind,
        reason: String,
    },

    /// The run was cancelled between pairs.
    #[error("analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn algorithm_failure(algorithm: AlgorithmKind, reason: impl Into<String>) -> Self {
        Self::AlgorithmFailure {
            algorithm,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
