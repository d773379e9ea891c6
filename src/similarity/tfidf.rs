// TF-IDF vector space model.
//
// The model is fitted on a small local corpus (in practice the two
// documents of one pair) and then turns token lists into dense weight
// vectors over that corpus's vocabulary.
//
//   idf(t) = ln(N / (df(t) + 1)) + 1
//   tf(t)  = count(t) / len(document)
//
// The +1 terms keep idf finite and positive for every fitted term, even
// when the corpus holds a single document.

use std::collections::{HashMap, HashSet};

/// Vocabulary and IDF table for one fitted corpus.
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceModel {
    /// term -> position in the dense vectors
    vocabulary: HashMap<String, usize>,
    /// idf by vocabulary position
    idf: Vec<f64>,
    document_count: usize,
}

impl VectorSpaceModel {
    /// Fit a fresh model. Vocabulary positions follow first appearance
    /// across the corpus, so the same corpus always yields the same layout.
    pub fn fit<D: AsRef<[String]>>(corpus: &[D]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in corpus {
            let unique: HashSet<&String> = document.as_ref().iter().collect();
            for term in document.as_ref() {
                if !vocabulary.contains_key(term) {
                    vocabulary.insert(term.clone(), vocabulary.len());
                    document_frequency.push(0);
                }
            }
            for term in unique {
                document_frequency[vocabulary[term]] += 1;
            }
        }

        let document_count = corpus.len();
        let idf = document_frequency
            .iter()
            .map(|&df| (document_count as f64 / (df as f64 + 1.0)).ln() + 1.0)
            .collect();

        Self {
            vocabulary,
            idf,
            document_count,
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// IDF weight of a fitted term, `None` when the term is out of vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    /// Dense TF-IDF vector for `tokens`. Out-of-vocabulary tokens still
    /// count towards the document length but carry no weight.
    pub fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        if tokens.is_empty() {
            return vector;
        }

        let total = tokens.len() as f64;
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        for (index, count) in counts {
            vector[index] = (count as f64 / total) * self.idf[index];
        }
        vector
    }
}

/// Cosine of the angle between two vectors.
///
/// Returns 0.0 when the lengths differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}
