//! # prodsim Core
//!
//! Core library for prodsim content-based product recommendations.
//!
//! This crate provides the catalog and the similarity index:
//!
//! - [`Catalog`] - Ordered product list loaded from a CSV dataset
//! - [`TfidfVectorizer`] - TF-IDF weighting with an English stop-word list
//! - [`SimilarityMatrix`] - Precomputed pairwise cosine similarity
//! - [`SimilarityIndex`] - Nearest-neighbour queries by name or substring
//!
//! ## Example
//!
//! ```rust
//! use prodsim_core::{Catalog, Product, SimilarityIndex};
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("Red Shoe").with_category("Footwear"),
//!     Product::new("Blue Shoe").with_category("Footwear"),
//!     Product::new("Red Hat").with_category("Headwear"),
//! ]);
//! let index = SimilarityIndex::build(catalog);
//!
//! let similar = index.recommend("Red Shoe", 2);
//! assert_eq!(similar[0].name, "Blue Shoe");
//! assert!(index.recommend("nonexistent", 5).is_empty());
//! ```

pub mod catalog;
pub mod error;
pub mod index;
pub mod matrix;
pub mod product;
pub mod sparse;
pub mod tfidf;
pub mod tokenizer;

pub use catalog::{Catalog, REQUIRED_COLUMNS};
pub use error::{Error, Result};
pub use index::{SimilarityIndex, DEFAULT_TOP_N};
pub use matrix::SimilarityMatrix;
pub use product::{Product, ProductView, ScoredProduct};
pub use sparse::SparseVector;
pub use tfidf::TfidfVectorizer;
pub use tokenizer::{tokenize, ENGLISH_STOP_WORDS};
