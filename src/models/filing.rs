// file: src/models/filing.rs
// description: filing metadata, attachments and press releases as seen by the scanner
// reference: EDGAR submission structure

use crate::error::SurfaceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document-name suffixes treated as readable text.
pub const TEXTUAL_EXTENSIONS: &[&str] = &[".htm", ".html", ".txt"];

/// Type-label prefix marking an exhibit.
pub const EXHIBIT_PREFIX: &str = "EX";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMeta {
    pub company: String,
    pub cik: u64,
    pub filing_date: NaiveDate,
    pub accession_no: String,
    pub form: String,
    #[serde(default)]
    pub items: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub document: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Attachment {
    pub fn new(document: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            kind: kind.into(),
            description: None,
        }
    }

    /// Textual document name, or a type label marking an exhibit.
    pub fn is_scannable(&self) -> bool {
        let document = self.document.to_lowercase();
        let kind = self.kind.to_uppercase();

        TEXTUAL_EXTENSIONS.iter().any(|ext| document.ends_with(ext))
            || kind.starts_with(EXHIBIT_PREFIX)
    }

    /// Name used in the `attachment:<label>` provenance tag.
    pub fn label(&self) -> &str {
        if self.document.is_empty() {
            &self.kind
        } else {
            &self.document
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressRelease {
    pub document: String,
    pub content: Result<String, SurfaceError>,
}

/// Press-release capability of a filing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PressReleases {
    /// The filing kind has no press-release notion at all.
    #[default]
    Absent,
    /// The capability exists but the filing carries no press release.
    NotIncluded,
    Included(Vec<PressRelease>),
}
