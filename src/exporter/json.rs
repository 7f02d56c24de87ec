// file: src/exporter/json.rs
// description: json export of result tables with a run manifest

use crate::error::{Result, ScanError};
use crate::models::{ResultTable, TableSchema};
use crate::pipeline::ScanStats;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedTable<'a> {
    pub schema: TableSchema,
    pub filing_date: NaiveDate,
    pub columns: &'a [&'static str],
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub filing_date: NaiveDate,
    pub total_rows: usize,
    pub filings_scanned: usize,
    pub surface_failures: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ScanError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes `<schema>_<date>.json` plus `manifest.json` and returns the manifest.
    pub fn export_table(
        &self,
        table: &ResultTable,
        filing_date: NaiveDate,
        stats: &ScanStats,
        pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let file_name = format!("{}_{}.json", schema_slug(table.schema()), filing_date);
        let exported = ExportedTable {
            schema: table.schema(),
            filing_date,
            columns: table.columns(),
            rows: table.records(),
        };
        self.write_json(&file_name, &exported, pretty)?;

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            filing_date,
            total_rows: table.len(),
            filings_scanned: stats.filings_scanned,
            surface_failures: stats.surface_failures,
            files: vec![file_name],
        };
        self.write_json("manifest.json", &manifest, pretty)?;

        info!("Export complete: {} rows exported", manifest.total_rows);
        Ok(manifest)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let body = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, body).map_err(|source| ScanError::FileOperation { path, source })
    }
}

fn schema_slug(schema: TableSchema) -> &'static str {
    match schema {
        TableSchema::MergerAcquisition => "merger_acquisition",
        TableSchema::SpecialSituations => "special_situations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("nested"));
        assert!(exporter.is_ok());
    }

    #[test]
    fn test_empty_table_exports_schema() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 8, 8).unwrap();

        let manifest = exporter
            .export_table(
                &ResultTable::empty(TableSchema::SpecialSituations),
                date,
                &ScanStats::new(),
                true,
            )
            .unwrap();
        assert_eq!(manifest.files, vec!["special_situations_2025-08-08.json"]);

        let raw = fs::read_to_string(dir.path().join(&manifest.files[0])).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema"], "special_situations");
        assert_eq!(value["columns"].as_array().unwrap().len(), 8);
        assert!(value["rows"].as_array().unwrap().is_empty());
        assert!(dir.path().join("manifest.json").is_file());
    }
}
