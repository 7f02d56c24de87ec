// file: src/parser/mod.rs
// description: EDGAR index, submission and text parsing module exports
// reference: internal module structure

pub mod daily_index;
pub mod submission;
pub mod text;

pub use daily_index::{IndexEntry, parse_daily_index};
pub use submission::{Submission, SubmissionDocument};
pub use text::html_to_text;
