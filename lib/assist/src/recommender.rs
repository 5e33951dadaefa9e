//! Recommendation service
//!
//! Owns the similarity index and the language-model collaborators. Built
//! once before serving, then shared read-only between request handlers.

use crate::assistant::{Assistant, Candidate, SummaryRequest};
use prodsim_core::{Catalog, Product, ProductView, SimilarityIndex};
use std::path::Path;
use tracing::debug;

/// Catalog entries offered to the resolver as context
pub const RESOLVER_CANDIDATES: usize = 100;

#[derive(Debug)]
pub struct Recommender {
    index: SimilarityIndex,
    assistant: Assistant,
}

impl Recommender {
    pub fn new(index: SimilarityIndex, assistant: Assistant) -> Self {
        Self { index, assistant }
    }

    /// Load the catalog, build the index and attach `assistant`
    pub fn from_csv_path(path: impl AsRef<Path>, assistant: Assistant) -> prodsim_core::Result<Self> {
        Ok(Self::new(SimilarityIndex::from_csv_path(path)?, assistant))
    }

    #[inline]
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        self.index.catalog()
    }

    /// Products most similar to the one named exactly `name`
    pub fn recommend(&self, name: &str, top_n: usize) -> Vec<ProductView> {
        self.index.recommend(name, top_n)
    }

    /// Resolve free text to a product, then recommend around it.
    ///
    /// The resolver is asked first; when it has no match that exists in the
    /// catalog, the first product whose name contains `query` (ignoring
    /// case) is used instead. `query` is matched as given, without trimming.
    /// Never fails, an empty list means no match.
    pub async fn smart_search(&self, query: &str, top_n: usize) -> Vec<ProductView> {
        let candidates: Vec<Candidate> = self
            .catalog()
            .iter()
            .take(RESOLVER_CANDIDATES)
            .map(Candidate::from)
            .collect();

        if let Some(name) = self.assistant.resolver.resolve(query, &candidates).await {
            if self.catalog().position(&name).is_some() {
                debug!("Resolved {:?} to {:?}", query, name);
                return self.index.recommend(&name, top_n);
            }
            debug!("Resolver suggested unknown product {:?}", name);
        }

        self.index.search_substring(query, top_n)
    }

    /// Why `results` were recommended for `original_name`. Empty when the
    /// original is not in the catalog, there are no results, or no insight
    /// is available.
    pub async fn explain(&self, original_name: &str, results: &[ProductView]) -> String {
        let Some(original) = self.lookup(original_name) else {
            return String::new();
        };
        if results.is_empty() {
            return String::new();
        }

        let request = SummaryRequest::Explanation {
            original: original.clone(),
            recommended: results.iter().map(|r| r.name.clone()).collect(),
        };
        self.assistant.generator.generate(request).await
    }

    /// Short comparison of the named products; unknown names are skipped
    pub async fn compare<S: AsRef<str>>(&self, names: &[S]) -> String {
        let products: Vec<Product> = names
            .iter()
            .filter_map(|name| self.lookup(name.as_ref()))
            .cloned()
            .collect();
        if products.is_empty() {
            return String::new();
        }
        self.assistant
            .generator
            .generate(SummaryRequest::Comparison { products })
            .await
    }

    fn lookup(&self, name: &str) -> Option<&Product> {
        self.catalog().position(name).and_then(|i| self.catalog().get(i))
    }
}
