// TF-IDF weighting over a fixed corpus
use crate::sparse::SparseVector;
use crate::tokenizer::tokenize;
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Vocabulary and smoothed inverse document frequencies learned from a corpus
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: AHashMap<String, u32>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and weights from `documents`, then return the
    /// L2-normalized vector of every document in input order.
    ///
    /// Term ids follow sorted term order. `idf = ln((1 + n) / (1 + df)) + 1`.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: AHashMap<String, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id as u32))
            .collect();

        let mut df = vec![0u32; vocabulary.len()];
        let counts: Vec<AHashMap<u32, u32>> = tokenized
            .iter()
            .map(|tokens| {
                let mut tf: AHashMap<u32, u32> = AHashMap::new();
                for token in tokens {
                    if let Some(&id) = vocabulary.get(token) {
                        *tf.entry(id).or_insert(0) += 1;
                    }
                }
                for &id in tf.keys() {
                    df[id as usize] += 1;
                }
                tf
            })
            .collect();

        let n = documents.len() as f32;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let vectors = counts.into_iter().map(|tf| vectorizer.weigh(tf)).collect();
        (vectorizer, vectors)
    }

    fn weigh(&self, tf: AHashMap<u32, u32>) -> SparseVector {
        let pairs = tf
            .into_iter()
            .map(|(id, count)| (id, count as f32 * self.idf[id as usize]))
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }
}
