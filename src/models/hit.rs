// file: src/models/hit.rs
// description: hit rows and the sorted result table produced by a scan
// reference: tabular output handed to the sink and exporter

use crate::models::{Category, FilingMeta, WhereFound};
use serde::Serialize;

pub const MERGER_ACQUISITION_COLUMNS: &[&str] = &[
    "company",
    "cik",
    "filing_date",
    "accession_no",
    "items",
    "where_found",
    "link",
];

pub const SPECIAL_SITUATIONS_COLUMNS: &[&str] = &[
    "company",
    "cik",
    "filing_date",
    "accession_no",
    "form_type",
    "classification",
    "where_found",
    "link",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSchema {
    MergerAcquisition,
    SpecialSituations,
}

impl TableSchema {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableSchema::MergerAcquisition => MERGER_ACQUISITION_COLUMNS,
            TableSchema::SpecialSituations => SPECIAL_SITUATIONS_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRow {
    pub company: String,
    pub cik: u64,
    pub filing_date: String,
    pub accession_no: String,
    pub items: Option<String>,
    pub form_type: Option<String>,
    pub classification: Option<Category>,
    pub where_found: String,
    pub link: Option<String>,
}

impl HitRow {
    pub fn new(meta: &FilingMeta, where_found: &WhereFound) -> Self {
        Self {
            company: meta.company.clone(),
            cik: meta.cik,
            filing_date: meta.filing_date.format("%Y-%m-%d").to_string(),
            accession_no: meta.accession_no.clone(),
            items: meta.items.clone(),
            form_type: None,
            classification: None,
            where_found: where_found.joined(),
            link: meta.url.clone(),
        }
    }

    pub fn with_classification(mut self, form_type: &str, category: Category) -> Self {
        self.form_type = Some(form_type.to_string());
        self.classification = Some(category);
        self
    }

    /// Text value of one column; missing values render as empty strings.
    pub fn value(&self, column: &str) -> String {
        match column {
            "company" => self.company.clone(),
            "cik" => self.cik.to_string(),
            "filing_date" => self.filing_date.clone(),
            "accession_no" => self.accession_no.clone(),
            "items" => self.items.clone().unwrap_or_default(),
            "form_type" => self.form_type.clone().unwrap_or_default(),
            "classification" => self
                .classification
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            "where_found" => self.where_found.clone(),
            "link" => self.link.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Hit rows under a fixed column schema, ordered by (company, filing_date).
/// The schema is present even when there are no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    schema: TableSchema,
    rows: Vec<HitRow>,
}

impl ResultTable {
    pub fn empty(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Sorts rows by company then filing date; ties keep collection order.
    pub fn from_rows(schema: TableSchema, mut rows: Vec<HitRow>) -> Self {
        rows.sort_by(|a, b| {
            a.company
                .cmp(&b.company)
                .then_with(|| a.filing_date.cmp(&b.filing_date))
        });
        Self { schema, rows }
    }

    pub fn schema(&self) -> TableSchema {
        self.schema
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[HitRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with their zero-based position in the sorted table.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &HitRow)> {
        self.rows.iter().enumerate()
    }

    /// Every row rendered as text in column order.
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns().iter().map(|c| row.value(c)).collect())
            .collect()
    }
}
