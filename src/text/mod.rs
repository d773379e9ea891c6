// Text normalization shared by every similarity algorithm.

pub mod normalizer;
pub mod stopwords;

pub use normalizer::Normalizer;
pub use stopwords::StopWordList;
