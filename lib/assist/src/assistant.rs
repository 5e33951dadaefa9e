//! Natural-language collaborators of the recommender
//!
//! Both traits are infallible at the boundary: implementations log their own
//! failures and report "nothing useful" as `None` or an empty string.

use async_trait::async_trait;
use prodsim_core::Product;
use serde::Serialize;
use std::sync::Arc;

/// Context handed to a [`QueryResolver`] for one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub category: String,
    pub brand: String,
}

impl From<&Product> for Candidate {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
        }
    }
}

/// What a [`SummaryGenerator`] is asked to write
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryRequest {
    /// Short comparison of a set of products
    Comparison { products: Vec<Product> },
    /// Why `recommended` suits someone interested in `original`
    Explanation {
        original: Product,
        recommended: Vec<String>,
    },
}

/// Maps free text to the exact name of a catalog product
#[async_trait]
pub trait QueryResolver: Send + Sync {
    /// `None` means no confident match, including when the resolver failed
    async fn resolve(&self, query: &str, candidates: &[Candidate]) -> Option<String>;
}

/// Writes short natural-language insight text
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// An empty string means no insight is available
    async fn generate(&self, request: SummaryRequest) -> String;
}

/// No-op collaborator used when no language model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

#[async_trait]
impl QueryResolver for Disabled {
    async fn resolve(&self, _query: &str, _candidates: &[Candidate]) -> Option<String> {
        None
    }
}

#[async_trait]
impl SummaryGenerator for Disabled {
    async fn generate(&self, _request: SummaryRequest) -> String {
        String::new()
    }
}

/// The pair of collaborators a [`crate::Recommender`] is built with
#[derive(Clone)]
pub struct Assistant {
    pub resolver: Arc<dyn QueryResolver>,
    pub generator: Arc<dyn SummaryGenerator>,
}

impl Assistant {
    pub fn new(resolver: Arc<dyn QueryResolver>, generator: Arc<dyn SummaryGenerator>) -> Self {
        Self {
            resolver,
            generator,
        }
    }

    /// Both collaborators disabled
    pub fn disabled() -> Self {
        Self::new(Arc::new(Disabled), Arc::new(Disabled))
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant").finish_non_exhaustive()
    }
}
