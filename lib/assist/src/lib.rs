//! # prodsim Assist
//!
//! Language-model collaborators and the recommendation service built on
//! top of [`prodsim_core::SimilarityIndex`].
//!
//! - [`QueryResolver`] / [`SummaryGenerator`] - narrow traits for the
//!   natural-language features
//! - [`ChatAssistant`] - OpenAI-compatible chat-completions implementation
//! - [`Disabled`] - no-op implementation used when no API key is set
//! - [`Recommender`] - `recommend`, `smart_search`, `explain`, `compare`
//!
//! ## Example
//!
//! ```rust
//! use prodsim_assist::{AssistantConfig, Recommender};
//! use prodsim_core::{Catalog, Product, SimilarityIndex};
//!
//! let index = SimilarityIndex::build(Catalog::from_products(vec![
//!     Product::new("Red Shoe"),
//!     Product::new("Blue Shoe"),
//! ]));
//! // No API key: resolver and generators are disabled
//! let recommender = Recommender::new(index, AssistantConfig::default().build());
//! assert_eq!(recommender.recommend("Red Shoe", 5).len(), 1);
//! ```

pub mod assistant;
pub mod chat;
pub mod config;
pub mod error;
pub mod recommender;

pub use assistant::{Assistant, Candidate, Disabled, QueryResolver, SummaryGenerator, SummaryRequest};
pub use chat::{ChatAssistant, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use config::{AssistantConfig, DEFAULT_TIMEOUT};
pub use error::{AssistError, Result};
pub use recommender::{Recommender, RESOLVER_CANDIDATES};
