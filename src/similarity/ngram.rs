// N-gram Jaccard similarity.
//
// Each text becomes the set of its contiguous lemma windows of size n,
// joined with single spaces. A text with fewer than n lemmas contributes a
// single n-gram made of all its lemmas, so short texts never produce an
// empty set.

use std::collections::HashSet;

use super::traits::{AlgorithmKind, SimilarityAlgorithm};
use crate::error::Result;
use crate::text::Normalizer;

pub const DEFAULT_NGRAM_SIZE: usize = 3;

pub struct NGramSimilarity {
    normalizer: Normalizer,
    n: usize,
}

impl NGramSimilarity {
    /// A window size of 0 falls back to `DEFAULT_NGRAM_SIZE`.
    pub fn new(normalizer: Normalizer, n: usize) -> Self {
        Self {
            normalizer,
            n: if n == 0 { DEFAULT_NGRAM_SIZE } else { n },
        }
    }

    pub fn window_size(&self) -> usize {
        self.n
    }

    pub fn ngrams(&self, lemmas: &[String]) -> HashSet<String> {
        if lemmas.len() < self.n {
            return HashSet::from([lemmas.join(" ")]);
        }
        lemmas.windows(self.n).map(|w| w.join(" ")).collect()
    }
}

impl SimilarityAlgorithm for NGramSimilarity {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::NGram
    }

    fn calculate_similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        let lemmas_a = self.normalizer.lemmas(text_a);
        let lemmas_b = self.normalizer.lemmas(text_b);

        match (lemmas_a.is_empty(), lemmas_b.is_empty()) {
            (true, true) => return Ok(1.0),
            (true, false) | (false, true) => return Ok(0.0),
            (false, false) => {}
        }

        let grams_a = self.ngrams(&lemmas_a);
        let grams_b = self.ngrams(&lemmas_b);

        Ok(jaccard(&grams_a, &grams_b).clamp(0.0, 1.0))
    }
}

/// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn zero_window_falls_back_to_default() {
        let ngram = NGramSimilarity::new(Normalizer::default(), 0);
        assert_eq!(ngram.window_size(), DEFAULT_NGRAM_SIZE);
    }

    #[test]
    fn short_documents_become_one_gram() {
        let ngram = NGramSimilarity::new(Normalizer::default(), 3);
        let grams = ngram.ngrams(&lemmas(&["apple", "pie"]));
        assert_eq!(grams, HashSet::from(["apple pie".to_string()]));
    }

    #[test]
    fn windows_are_deduplicated() {
        let ngram = NGramSimilarity::new(Normalizer::default(), 2);
        let grams = ngram.ngrams(&lemmas(&["a1", "b1", "a1", "b1"]));
        assert_eq!(grams.len(), 2);
        assert!(grams.contains("a1 b1"));
        assert!(grams.contains("b1 a1"));
    }

    #[test]
    fn jaccard_counts_shared_windows() {
        let ngram = NGramSimilarity::new(Normalizer::default(), 2);
        // {apple banana, banana cherry} vs {apple banana, banana grape}
        let s = ngram
            .calculate_similarity("apple banana cherry", "apple banana grape")
            .unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-12, "got {s}");
    }

    #[test]
    fn empty_policy() {
        let ngram = NGramSimilarity::new(Normalizer::default(), 3);
        assert_eq!(ngram.calculate_similarity("", "").unwrap(), 1.0);
        assert_eq!(ngram.calculate_similarity("", "apple").unwrap(), 0.0);
        assert_eq!(jaccard(&HashSet::new(), &HashSet::new()), 0.0);
    }
}
