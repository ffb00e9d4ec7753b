//! Labelgate Filter - Node eligibility for the scheduler extender
//!
//! This crate provides:
//! - The filter predicate trait and the label-equality predicate
//! - The filter engine partitioning candidates into eligible and rejected

pub mod engine;
pub mod filter;
pub mod types;

// Re-export commonly used types
pub use engine::{FilterEngine, NO_NODES_ERROR};
pub use filter::{default_filters, FilterPredicate, LabelEquals};
pub use types::{FilterContext, NodeVerdict};
