// file: src/parser/daily_index.rs
// description: parser for EDGAR daily form index files (form.YYYYMMDD.idx)
// reference: https://www.sec.gov/Archives/edgar/daily-index/

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    // Form and company are padded columns that may contain single spaces;
    // CIK, date and path never do.
    static ref INDEX_ROW: Regex = Regex::new(
        r"^(?P<form>\S.*?)\s{2,}(?P<company>\S.*?)\s+(?P<cik>\d+)\s+(?P<date>\d{8})\s+(?P<path>\S+)\s*$"
    ).expect("INDEX_ROW regex is valid");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub form: String,
    pub company: String,
    pub cik: u64,
    pub filing_date: NaiveDate,
    pub path: String,
}

impl IndexEntry {
    /// Accession number taken from the submission file name.
    pub fn accession_no(&self) -> String {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        file.strip_suffix(".txt").unwrap_or(file).to_string()
    }
}

/// Rows after the dashed separator line; malformed rows are skipped.
pub fn parse_daily_index(raw: &str) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    let mut in_body = false;

    for line in raw.lines() {
        if !in_body {
            in_body = line.starts_with("---");
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Some(entry) => entries.push(entry),
            None => debug!("Skipping unparseable index row: {}", line),
        }
    }

    entries
}

fn parse_row(line: &str) -> Option<IndexEntry> {
    let caps = INDEX_ROW.captures(line)?;
    Some(IndexEntry {
        form: caps["form"].trim().to_string(),
        company: caps["company"].trim().to_string(),
        cik: caps["cik"].parse().ok()?,
        filing_date: NaiveDate::parse_from_str(&caps["date"], "%Y%m%d").ok()?,
        path: caps["path"].to_string(),
    })
}
