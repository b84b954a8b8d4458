//! Fallback & variation engine: canned and deterministic content that stands in
//! whenever the model call fails or returns something unusable.

pub mod content;
pub mod scenario_bag;
pub mod scenario_catalog;
