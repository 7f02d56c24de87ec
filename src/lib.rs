// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod matching;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod sink;
pub mod source;
pub mod utils;

pub use config::{Config, EdgarConfig, ScanConfig, SinkConfig};
pub use error::{Result, ScanError, SurfaceError};
pub use exporter::json::{ExportManifest, JsonExporter};
pub use matching::{MatchMode, PatternRegistry, SituationClassifier, TextMatcher};
pub use models::{Category, FilingMeta, HitRow, ResultTable, TableSchema, WhereFound};
pub use pipeline::{ProgressTracker, ScanOrchestrator, ScanReport, ScanStats};
pub use scanner::{FilingSurfaceScanner, ScanOptions, SurfaceOutcome};
pub use sink::{CsvWorkbook, TabCapacity, Workbook, Worksheet, append_table};
pub use source::{EdgarSource, FilingHandle, FilingSource, SnapshotSource};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let registry = PatternRegistry::shared();
        assert!(TextMatcher::new(registry).matches(Some("a merger"), MatchMode::default()));
        assert_eq!(
            SituationClassifier::new(registry).classify(Some("buyback")),
            Category::Buyback
        );
    }
}
