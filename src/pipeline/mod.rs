// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod orchestrator;
mod progress;

pub use orchestrator::{MERGER_ACQUISITION_FORM, ScanOrchestrator, ScanReport};
pub use progress::{ProgressTracker, ScanStats};
