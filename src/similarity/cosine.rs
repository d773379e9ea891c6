// TF-IDF cosine similarity between two texts.
//
// Each call fits a fresh vector space model on exactly the two documents
// being compared, so scores are pair-local: every pair defines its own
// vocabulary and IDF baseline. Nothing is cached between pairs.

use tracing::trace;

use super::tfidf::{cosine_similarity, VectorSpaceModel};
use super::traits::{AlgorithmKind, SimilarityAlgorithm};
use crate::error::Result;
use crate::text::Normalizer;

pub struct CosineSimilarity {
    normalizer: Normalizer,
}

impl CosineSimilarity {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }
}

impl SimilarityAlgorithm for CosineSimilarity {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::CosineSimilarity
    }

    fn calculate_similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        let lemmas_a = self.normalizer.lemmas(text_a);
        let lemmas_b = self.normalizer.lemmas(text_b);

        // An empty side is "no evidence", not a match
        if lemmas_a.is_empty() || lemmas_b.is_empty() {
            return Ok(0.0);
        }

        let model = VectorSpaceModel::fit(&[&lemmas_a[..], &lemmas_b[..]]);
        let vector_a = model.transform(&lemmas_a);
        let vector_b = model.transform(&lemmas_b);

        let similarity = cosine_similarity(&vector_a, &vector_b);
        trace!(
            vocabulary = model.vocabulary_len(),
            similarity,
            "Cosine similarity computed"
        );

        Ok(similarity.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(a: &str, b: &str) -> f64 {
        CosineSimilarity::new(Normalizer::default())
            .calculate_similarity(a, b)
            .unwrap()
    }

    #[test]
    fn identical_texts_score_one() {
        let s = score("the quick brown fox", "the quick brown fox");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(score("", "some words here"), 0.0);
        assert_eq!(score("", ""), 0.0);
        assert_eq!(score("!!! ...", "the and or"), 0.0);
    }

    #[test]
    fn disjoint_vocabularies_score_zero() {
        assert_eq!(score("apple banana cherry", "violin trumpet drum"), 0.0);
    }

    #[test]
    fn partial_overlap_is_strictly_between() {
        let s = score("apple banana cherry", "apple banana grape");
        assert!(s > 0.0 && s < 1.0, "got {s}");
    }
}
