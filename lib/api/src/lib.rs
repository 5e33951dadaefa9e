//! # prodsim API
//!
//! JSON HTTP surface over [`prodsim_assist::Recommender`].

pub mod rest;

pub use rest::{routes, ApiState, RestApi};
