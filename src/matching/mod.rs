// file: src/matching/mod.rs
// description: keyword matching and classification module exports
// reference: internal module structure

pub mod classifier;
pub mod matcher;
pub mod patterns;

pub use classifier::SituationClassifier;
pub use matcher::{MatchMode, TextMatcher};
pub use patterns::{CategoryRule, KeywordPattern, PatternRegistry};
