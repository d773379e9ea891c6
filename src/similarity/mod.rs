// Similarity algorithms: TF-IDF cosine, LCS ratio, n-gram Jaccard.

pub mod cosine;
pub mod factory;
pub mod lcs;
pub mod ngram;
pub mod tfidf;
pub mod traits;

pub use factory::{parse_selection, AlgorithmFactory};
pub use traits::{AlgorithmKind, SimilarityAlgorithm};
