// file: src/sink/csv_workbook.rs
// description: local workbook where each tab is a CSV file under a spreadsheet-key directory
// reference: https://docs.rs/csv

use crate::error::{Result, ScanError};
use crate::sink::{Workbook, Worksheet};
use crate::utils::validation::Validator;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    key: String,
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Opens `<root>/<key>/`; the directory must already exist.
    pub fn open(root: &Path, key: &str) -> Result<Self> {
        Validator::validate_sheet_name(key)?;
        let dir = root.join(key);
        Validator::validate_directory(&dir)?;
        Ok(Self {
            key: key.to_string(),
            dir,
        })
    }

    /// Opens the workbook, creating its directory when missing.
    pub fn open_or_create(root: &Path, key: &str) -> Result<Self> {
        Validator::validate_sheet_name(key)?;
        let dir = root.join(key);
        fs::create_dir_all(&dir).map_err(|source| ScanError::FileOperation {
            path: dir.clone(),
            source,
        })?;
        Self::open(root, key)
    }

    fn tab_path(&self, title: &str) -> Result<PathBuf> {
        Validator::validate_sheet_name(title)?;
        Ok(self.dir.join(format!("{}.csv", title)))
    }
}

impl Workbook for CsvWorkbook {
    type Sheet = CsvWorksheet;

    fn key(&self) -> &str {
        &self.key
    }

    fn worksheet(&self, title: &str) -> Result<Option<CsvWorksheet>> {
        let path = self.tab_path(title)?;
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(CsvWorksheet {
            title: title.to_string(),
            path,
        }))
    }

    fn add_worksheet(&self, title: &str, rows: usize, cols: usize) -> Result<CsvWorksheet> {
        let path = self.tab_path(title)?;
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => ScanError::Sink(format!(
                    "worksheet '{}' already exists in {}",
                    title, self.key
                )),
                _ => ScanError::FileOperation {
                    path: path.clone(),
                    source,
                },
            })?;
        // CSV has no fixed grid; the requested size is informational.
        debug!("Created tab {} ({} rows x {} cols)", path.display(), rows, cols);

        Ok(CsvWorksheet {
            title: title.to_string(),
            path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CsvWorksheet {
    title: String,
    path: PathBuf,
}

impl CsvWorksheet {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Worksheet for CsvWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    fn first_row(&mut self) -> Result<Option<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        match reader.records().next() {
            Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
            None => Ok(None),
        }
    }

    fn append_rows(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| ScanError::FileOperation {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = WriterBuilder::new().flexible(true).from_writer(file);
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, FilingMeta, HitRow, ResultTable, SurfaceTag, TableSchema, WhereFound,
    };
    use crate::sink::{TabCapacity, append_table};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn table(company: &str) -> ResultTable {
        let mut found = WhereFound::new();
        found.insert(SurfaceTag::Primary);
        let meta = FilingMeta {
            company: company.to_string(),
            cik: 42,
            filing_date: NaiveDate::from_ymd_opt(2025, 8, 8).unwrap(),
            accession_no: "0000000042-25-000001".to_string(),
            form: "SC 13D".to_string(),
            items: None,
            url: None,
        };
        let row = HitRow::new(&meta, &found).with_classification("SC 13D", Category::Activist13d);
        ResultTable::from_rows(TableSchema::SpecialSituations, vec![row])
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_creates_tab_with_header_then_appends() {
        let temp = TempDir::new().unwrap();
        let workbook = CsvWorkbook::open_or_create(temp.path(), "sheet-key").unwrap();

        let written = append_table(&table("Acme, Corp"), &workbook, "hits", TabCapacity::default())
            .unwrap();
        assert_eq!(written, 1);
        append_table(&table("Beta LLC"), &workbook, "hits", TabCapacity::default()).unwrap();

        let lines = read_lines(&temp.path().join("sheet-key").join("hits.csv"));
        assert_eq!(
            lines,
            vec![
                "company,cik,filing_date,accession_no,form_type,classification,where_found,link",
                "\"Acme, Corp\",42,2025-08-08,0000000042-25-000001,SC 13D,Activist/13D,primary,",
                "Beta LLC,42,2025-08-08,0000000042-25-000001,SC 13D,Activist/13D,primary,",
            ]
        );
    }

    #[test]
    fn test_blank_first_row_gets_header() {
        let temp = TempDir::new().unwrap();
        let workbook = CsvWorkbook::open_or_create(temp.path(), "key").unwrap();
        let mut sheet = workbook.add_worksheet("hits", 100, 10).unwrap();
        sheet.append_row(&[" ".to_string(), String::new()]).unwrap();

        append_table(&table("Acme"), &workbook, "hits", TabCapacity::default()).unwrap();

        let lines = read_lines(sheet.path());
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("company,cik"));
    }

    #[test]
    fn test_empty_table_is_noop() {
        let temp = TempDir::new().unwrap();
        let workbook = CsvWorkbook::open_or_create(temp.path(), "key").unwrap();

        let empty = ResultTable::empty(TableSchema::MergerAcquisition);
        assert_eq!(
            append_table(&empty, &workbook, "hits", TabCapacity::default()).unwrap(),
            0
        );
        assert!(workbook.worksheet("hits").unwrap().is_none());
    }

    #[test]
    fn test_adding_existing_tab_is_sink_error() {
        let temp = TempDir::new().unwrap();
        let workbook = CsvWorkbook::open_or_create(temp.path(), "key").unwrap();
        workbook.add_worksheet("hits", 100, 10).unwrap();

        assert!(matches!(
            workbook.add_worksheet("hits", 100, 10),
            Err(ScanError::Sink(_))
        ));
    }

    #[test]
    fn test_missing_workbook_directory() {
        let temp = TempDir::new().unwrap();
        assert!(CsvWorkbook::open(temp.path(), "absent").is_err());
    }

    #[test]
    fn test_rejects_path_like_tab_names() {
        let temp = TempDir::new().unwrap();
        let workbook = CsvWorkbook::open_or_create(temp.path(), "key").unwrap();
        assert!(workbook.worksheet("../escape").is_err());
    }
}
