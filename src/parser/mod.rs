// src/parser/mod.rs
pub mod details;
pub mod document;
pub mod models;
pub mod text;
pub mod versions;

// Re-export key parsing types for convenience
pub use document::parse_document;
pub use models::{ConformanceLevel, Detail, DetailItem, Guideline, Principle, SuccessCriterion, WcagDocument};
