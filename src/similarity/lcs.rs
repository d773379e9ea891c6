// Longest-common-subsequence similarity over lemma sequences.
//
//   score = lcs(a, b) / ((|a| + |b|) / 2)
//
// Two texts with the same lemma multiset score 1.0 without running the DP:
// for this algorithm a full reordering of the same content is a match.

use super::traits::{AlgorithmKind, SimilarityAlgorithm};
use crate::error::{AnalysisError, Result};
use crate::text::Normalizer;

pub struct LcsSimilarity {
    normalizer: Normalizer,
    /// Optional ceiling on |a| * |b| DP cells; `None` aligns any pair
    max_cells: Option<usize>,
}

impl LcsSimilarity {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            max_cells: None,
        }
    }

    /// Refuse pairs whose DP table would exceed `max_cells` cells.
    ///
    /// Memory stays O(|b|) either way; the limit only bounds running time.
    pub fn with_max_cells(normalizer: Normalizer, max_cells: usize) -> Self {
        Self {
            normalizer,
            max_cells: Some(max_cells),
        }
    }
}

impl SimilarityAlgorithm for LcsSimilarity {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::LongestCommonSubsequence
    }

    fn calculate_similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        let lemmas_a = self.normalizer.lemmas(text_a);
        let lemmas_b = self.normalizer.lemmas(text_b);

        match (lemmas_a.is_empty(), lemmas_b.is_empty()) {
            (true, true) => return Ok(1.0),
            (true, false) | (false, true) => return Ok(0.0),
            (false, false) => {}
        }

        if same_multiset(&lemmas_a, &lemmas_b) {
            return Ok(1.0);
        }

        let cells = lemmas_a.len().saturating_mul(lemmas_b.len());
        if let Some(max_cells) = self.max_cells.filter(|&max| cells > max) {
            return Err(AnalysisError::algorithm_failure(
                self.kind(),
                format!(
                    "alignment table of {} x {} tokens exceeds the {} cell limit",
                    lemmas_a.len(),
                    lemmas_b.len(),
                    max_cells
                ),
            ));
        }

        let lcs = lcs_length(&lemmas_a, &lemmas_b);
        let mean_len = (lemmas_a.len() + lemmas_b.len()) as f64 / 2.0;

        Ok((lcs as f64 / mean_len).clamp(0.0, 1.0))
    }
}

fn same_multiset(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&String> = a.iter().collect();
    let mut b: Vec<&String> = b.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Length of the longest common subsequence.
///
/// Standard recurrence, dp[i][j] = dp[i-1][j-1] + 1 on a match and
/// max(dp[i-1][j], dp[i][j-1]) otherwise, kept as two rolling rows.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for item_a in a {
        for (j, item_b) in b.iter().enumerate() {
            current[j + 1] = if item_a == item_b {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(a: &str, b: &str) -> f64 {
        LcsSimilarity::new(Normalizer::default())
            .calculate_similarity(a, b)
            .unwrap()
    }

    #[test]
    fn lcs_length_textbook_cases() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        assert_eq!(lcs_length(&a, &b), 4);
        assert_eq!(lcs_length::<char>(&[], &b), 0);
        assert_eq!(lcs_length(&a, &a), a.len());
    }

    #[test]
    fn empty_policy() {
        assert_eq!(score("", ""), 1.0);
        assert_eq!(score("the and", "!!!"), 1.0);
        assert_eq!(score("", "something here"), 0.0);
        assert_eq!(score("something here", ""), 0.0);
    }

    #[test]
    fn reordered_content_is_a_full_match() {
        assert_eq!(score("apple banana cherry", "cherry apple banana"), 1.0);
    }

    #[test]
    fn score_is_lcs_over_mean_length() {
        // lemmas: [apple, banana, cherry, grape] vs [apple, cherry]
        // lcs = 2, mean length = 3
        let s = score("apple banana cherry grape", "apple cherry");
        assert!((s - 2.0 / 3.0).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn oversized_alignment_is_a_failure() {
        let lcs = LcsSimilarity::with_max_cells(Normalizer::default(), 3);
        let err = lcs
            .calculate_similarity("apple banana cherry", "violin trumpet")
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::AlgorithmFailure {
                algorithm: AlgorithmKind::LongestCommonSubsequence,
                ..
            }
        ));
    }
}
