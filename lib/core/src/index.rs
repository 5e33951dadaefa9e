//! Content-based similarity index over a product catalog
//!
//! The index owns the catalog together with its TF-IDF vectors and the
//! pairwise similarity matrix, so the matrix dimensions always match the
//! catalog. Once built it is immutable and can be shared freely between
//! threads.

use crate::catalog::Catalog;
use crate::matrix::SimilarityMatrix;
use crate::product::{ProductView, ScoredProduct};
use crate::tfidf::TfidfVectorizer;
use crate::Result;
use std::cmp::Ordering;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default number of neighbours returned per query
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl SimilarityIndex {
    /// Vectorize every product's combined text and compute the full
    /// similarity matrix
    pub fn build(catalog: Catalog) -> Self {
        let start = Instant::now();
        let texts = catalog.combined_texts();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&texts);
        debug!(
            "Vectorized {} products over {} terms in {:?}",
            vectors.len(),
            vectorizer.vocabulary_size(),
            start.elapsed()
        );

        let matrix = SimilarityMatrix::build(&vectors);
        info!(
            "Built {}x{} similarity matrix in {:?}",
            matrix.dim(),
            matrix.dim(),
            start.elapsed()
        );

        Self { catalog, matrix }
    }

    /// Load the catalog from a CSV file and build the index over it
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::build(Catalog::from_csv_path(path)?))
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Neighbours of the product at `index`, most similar first. Ties keep
    /// catalog order and the product itself is never included.
    pub fn neighbours(&self, index: usize, top_n: usize) -> Vec<ScoredProduct> {
        let Some(row) = self.matrix.row(index) else {
            return Vec::new();
        };

        let mut scored: Vec<ScoredProduct> = row
            .iter()
            .enumerate()
            .map(|(i, &score)| ScoredProduct { index: i, score })
            .collect();
        // sort_by is stable
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .filter(|s| s.index != index)
            .take(top_n)
            .collect()
    }

    /// Scored neighbours of the product named exactly `name`. Unknown names
    /// yield an empty list. With duplicate names the first occurrence is used.
    pub fn recommend_scored(&self, name: &str, top_n: usize) -> Vec<ScoredProduct> {
        match self.catalog.position(name) {
            Some(index) => self.neighbours(index, top_n),
            None => {
                debug!("No product named {:?}", name);
                Vec::new()
            }
        }
    }

    /// Up to `top_n` products most similar to the one named exactly `name`
    pub fn recommend(&self, name: &str, top_n: usize) -> Vec<ProductView> {
        self.views(&self.recommend_scored(name, top_n))
    }

    /// Substring fallback for free-text queries: recommendations for the
    /// first product whose name contains `query`, ignoring case. `query` is
    /// matched as given, whitespace included.
    pub fn search_substring(&self, query: &str, top_n: usize) -> Vec<ProductView> {
        match self.catalog.find_containing(query).and_then(|i| self.catalog.get(i)) {
            Some(product) => {
                debug!("Substring match for {:?}: {:?}", query, product.name);
                self.recommend(&product.name, top_n)
            }
            None => Vec::new(),
        }
    }

    /// Project scored neighbours onto the caller-facing shape
    pub fn views(&self, scored: &[ScoredProduct]) -> Vec<ProductView> {
        scored
            .iter()
            .filter_map(|s| self.catalog.get(s.index))
            .map(|p| p.view())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Product;

    fn shoes() -> SimilarityIndex {
        SimilarityIndex::build(Catalog::from_products(vec![
            Product::new("Red Shoe").with_category("Footwear"),
            Product::new("Blue Shoe").with_category("Footwear"),
            Product::new("Red Hat").with_category("Headwear"),
        ]))
    }

    fn names(views: &[ProductView]) -> Vec<&str> {
        views.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_recommend_excludes_query_product() {
        let index = shoes();
        let result = index.recommend("Red Shoe", 2);
        assert_eq!(names(&result), vec!["Blue Shoe", "Red Hat"]);
    }

    #[test]
    fn test_recommend_unknown_name_is_empty() {
        let index = shoes();
        assert!(index.recommend("nonexistent", 5).is_empty());
        assert!(index.recommend("red shoe", 5).is_empty());
    }

    #[test]
    fn test_recommend_caps_at_catalog_size() {
        let index = shoes();
        assert_eq!(index.recommend("Red Hat", 10).len(), 2);
        assert_eq!(index.recommend("Red Hat", 1).len(), 1);
        assert!(index.recommend("Red Hat", 0).is_empty());
    }

    #[test]
    fn test_scores_non_increasing_and_ties_in_catalog_order() {
        let index = SimilarityIndex::build(Catalog::from_products(vec![
            Product::new("lamp"),
            Product::new("kettle"),
            Product::new("desk lamp"),
            Product::new("toaster"),
        ]));
        let scored = index.recommend_scored("lamp", 3);
        assert_eq!(scored[0].index, 2);
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
        // kettle and toaster both score 0.0
        assert_eq!(scored[1].index, 1);
        assert_eq!(scored[2].index, 3);
    }

    #[test]
    fn test_duplicate_names_first_occurrence_wins() {
        let index = SimilarityIndex::build(Catalog::from_products(vec![
            Product::new("Mug").with_brand("Acme"),
            Product::new("Mug").with_brand("Acme"),
        ]));
        let scored = index.recommend_scored("Mug", 5);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].index, 1);
    }

    #[test]
    fn test_single_product_has_no_neighbours() {
        let index = SimilarityIndex::build(Catalog::from_products(vec![Product::new("Solo")]));
        assert!(index.recommend("Solo", 5).is_empty());
    }

    #[test]
    fn test_search_substring() {
        let index = shoes();
        assert_eq!(
            names(&index.search_substring("HAT", 2)),
            names(&index.recommend("Red Hat", 2))
        );
        assert!(index.search_substring("scarf", 2).is_empty());
    }

    #[test]
    fn test_search_substring_matches_query_verbatim() {
        let index = SimilarityIndex::build(Catalog::from_products(vec![
            Product::new("Hatbox"),
            Product::new("Red Hat"),
            Product::new("Green Scarf"),
        ]));
        // leading space only matches inside a name
        assert_eq!(
            names(&index.search_substring(" hat", 2)),
            names(&index.recommend("Red Hat", 2))
        );
        assert_eq!(
            names(&index.search_substring("hat", 2)),
            names(&index.recommend("Hatbox", 2))
        );
        assert_eq!(
            names(&index.search_substring(" ", 2)),
            names(&index.recommend("Red Hat", 2))
        );
        assert!(index.search_substring("  ", 2).is_empty());
    }
}
