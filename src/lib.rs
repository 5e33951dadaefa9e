//! # prodsim
//!
//! Content-based product recommendations: given a product name or a free-text
//! query, find similar products in a catalog by TF-IDF cosine similarity.
//! Free-text queries can optionally be resolved by a hosted language model,
//! which can also write short comparisons and explanations of the results.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! GROQ_API_KEY=... prodsim --data clean_data.csv --http-port 5000
//! ```
//!
//! Without an API key the server still runs; free-text search falls back to
//! case-insensitive substring matching on product names.
//!
//! ### As a Library
//!
//! ```rust
//! use prodsim::prelude::*;
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("Red Shoe").with_category("Footwear"),
//!     Product::new("Blue Shoe").with_category("Footwear"),
//!     Product::new("Red Hat").with_category("Headwear"),
//! ]);
//! let index = SimilarityIndex::build(catalog);
//!
//! let similar = index.recommend("Red Shoe", 2);
//! assert_eq!(similar.len(), 2);
//! assert!(similar.iter().all(|p| p.name != "Red Shoe"));
//! ```
//!
//! ## Crate Structure
//!
//! - `prodsim-core` - Catalog loading, TF-IDF, similarity matrix and index
//! - `prodsim-assist` - Language-model collaborators and the `Recommender`
//! - `prodsim-api` - JSON HTTP routes

// Re-export core types
pub use prodsim_core::{
    Catalog, Product, ProductView, ScoredProduct,
    SimilarityIndex, SimilarityMatrix, TfidfVectorizer,
    Error, Result, DEFAULT_TOP_N,
};

// Re-export assistant
pub use prodsim_assist::{
    Assistant, AssistantConfig, ChatAssistant, Disabled,
    QueryResolver, SummaryGenerator, SummaryRequest, Recommender,
};

// Re-export API
pub use prodsim_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, Product, ProductView, ScoredProduct,
        SimilarityIndex, SimilarityMatrix,
        Error, Result,
        Assistant, AssistantConfig, Recommender,
        ApiState, RestApi,
    };
}
