// Algorithm factory keyed by the closed `AlgorithmKind` enumeration.

use super::cosine::CosineSimilarity;
use super::lcs::LcsSimilarity;
use super::ngram::{NGramSimilarity, DEFAULT_NGRAM_SIZE};
use super::traits::{AlgorithmKind, SimilarityAlgorithm};
use crate::error::Result;
use crate::text::Normalizer;

/// Builds algorithm instances sharing one normalizer and tuning.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmFactory {
    normalizer: Normalizer,
    ngram_size: usize,
    lcs_max_cells: Option<usize>,
}

impl Default for AlgorithmFactory {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl AlgorithmFactory {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            ngram_size: DEFAULT_NGRAM_SIZE,
            lcs_max_cells: None,
        }
    }

    pub fn with_ngram_size(mut self, n: usize) -> Self {
        self.ngram_size = n;
        self
    }

    /// Cap the LCS table size. `None` (the default) aligns pairs of any length.
    pub fn with_lcs_max_cells(mut self, cells: Option<usize>) -> Self {
        self.lcs_max_cells = cells;
        self
    }

    pub fn normalizer(&self) -> Normalizer {
        self.normalizer
    }

    pub fn create(&self, kind: AlgorithmKind) -> Box<dyn SimilarityAlgorithm> {
        match kind {
            AlgorithmKind::CosineSimilarity => Box::new(CosineSimilarity::new(self.normalizer)),
            AlgorithmKind::LongestCommonSubsequence => Box::new(match self.lcs_max_cells {
                Some(cells) => LcsSimilarity::with_max_cells(self.normalizer, cells),
                None => LcsSimilarity::new(self.normalizer),
            }),
            AlgorithmKind::NGram => Box::new(NGramSimilarity::new(self.normalizer, self.ngram_size)),
        }
    }

    /// Create by identifier, failing with `UnknownAlgorithm` before any work is done.
    pub fn create_by_name(&self, name: &str) -> Result<Box<dyn SimilarityAlgorithm>> {
        Ok(self.create(name.parse()?))
    }

    pub fn create_all(&self) -> Vec<Box<dyn SimilarityAlgorithm>> {
        AlgorithmKind::ALL.iter().map(|&k| self.create(k)).collect()
    }
}

/// Resolve a list of identifiers into algorithm kinds.
///
/// "all" (any case) selects every algorithm, as does an empty list.
/// Duplicates are dropped, keeping first-mention order. Any unknown name
/// fails the whole selection.
pub fn parse_selection<S: AsRef<str>>(names: &[S]) -> Result<Vec<AlgorithmKind>> {
    if names.is_empty() || names.iter().any(|n| n.as_ref().trim().eq_ignore_ascii_case("all")) {
        return Ok(AlgorithmKind::ALL.to_vec());
    }

    let mut kinds = Vec::with_capacity(names.len());
    for name in names {
        let kind: AlgorithmKind = name.as_ref().parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn creates_each_kind() {
        let factory = AlgorithmFactory::default();
        for kind in AlgorithmKind::ALL {
            assert_eq!(factory.create(kind).kind(), kind);
        }
        let all: Vec<_> = factory.create_all().iter().map(|a| a.kind()).collect();
        assert_eq!(all, AlgorithmKind::ALL.to_vec());
    }

    #[test]
    fn create_by_name_rejects_unknown() {
        let factory = AlgorithmFactory::default();
        assert!(factory.create_by_name("ngram").is_ok());
        assert!(matches!(
            factory.create_by_name("soundex"),
            Err(AnalysisError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn selection_handles_all_and_duplicates() {
        assert_eq!(parse_selection(&["ALL"]).unwrap(), AlgorithmKind::ALL.to_vec());
        assert_eq!(parse_selection::<&str>(&[]).unwrap(), AlgorithmKind::ALL.to_vec());
        assert_eq!(
            parse_selection(&["ngram", "cosine", "NGram"]).unwrap(),
            vec![AlgorithmKind::NGram, AlgorithmKind::CosineSimilarity]
        );
        assert!(parse_selection(&["cosine", "bogus"]).is_err());
    }
}
