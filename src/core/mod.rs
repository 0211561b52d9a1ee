//! Core dataset types and transformations

pub mod cache;
pub mod dataset;
pub mod log;
pub mod market;
pub mod tariff;

// Re-export main types for cleaner imports
pub use cache::Cache;
pub use dataset::{DatasetKind, DatasetProvider};
