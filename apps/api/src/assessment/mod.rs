//! Assessment orchestration: prompts, shape checks and the service that ties
//! them to the model gateway and the fallback engine.

pub mod field_profiles;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod service;
pub mod shape;
pub mod top_skills;

pub use service::{AssessmentService, AssessmentSettings};
