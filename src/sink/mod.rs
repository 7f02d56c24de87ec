// file: src/sink/mod.rs
// description: tabular append sink contract and workbook implementations
// reference: spreadsheet append semantics (header once, rows appended after existing content)

pub mod csv_workbook;

use crate::error::Result;
use crate::models::ResultTable;
use tracing::info;

pub use csv_workbook::{CsvWorkbook, CsvWorksheet};

pub trait Worksheet {
    fn title(&self) -> &str;

    /// First row of the tab, if any.
    fn first_row(&mut self) -> Result<Option<Vec<String>>>;

    fn append_rows(&mut self, rows: &[Vec<String>]) -> Result<()>;

    fn append_row(&mut self, row: &[String]) -> Result<()> {
        self.append_rows(&[row.to_vec()])
    }
}

pub trait Workbook {
    type Sheet: Worksheet;

    fn key(&self) -> &str;

    /// `Ok(None)` when no tab has this title.
    fn worksheet(&self, title: &str) -> Result<Option<Self::Sheet>>;

    fn add_worksheet(&self, title: &str, rows: usize, cols: usize) -> Result<Self::Sheet>;
}

/// Grid size requested when a tab has to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabCapacity {
    pub rows: usize,
    pub min_cols: usize,
}

impl Default for TabCapacity {
    fn default() -> Self {
        Self {
            rows: 100,
            min_cols: 10,
        }
    }
}

/// Appends the table to `tab`, writing the header first when the tab has
/// none. Returns the number of data rows appended; empty tables are a no-op.
pub fn append_table<W: Workbook>(
    table: &ResultTable,
    workbook: &W,
    tab: &str,
    capacity: TabCapacity,
) -> Result<usize> {
    if table.is_empty() {
        info!("Result table is empty, nothing to append.");
        return Ok(0);
    }

    let mut sheet = match workbook.worksheet(tab)? {
        Some(sheet) => {
            info!("Using existing worksheet: {}", tab);
            sheet
        }
        None => {
            let cols = capacity.min_cols.max(table.columns().len());
            let sheet = workbook.add_worksheet(tab, capacity.rows, cols)?;
            info!("Created worksheet: {}", tab);
            sheet
        }
    };

    let header_present = sheet
        .first_row()?
        .is_some_and(|row| row.iter().any(|cell| !cell.trim().is_empty()));

    if !header_present {
        let header: Vec<String> = table.columns().iter().map(|c| c.to_string()).collect();
        sheet.append_row(&header)?;
        info!("Wrote header with {} columns.", header.len());
    }

    let records = table.records();
    sheet.append_rows(&records)?;
    info!(
        "Appended {} rows to '{}' in sheet {}.",
        records.len(),
        sheet.title(),
        workbook.key()
    );

    Ok(records.len())
}
