// file: src/source/snapshot.rs
// description: offline filing source backed by JSON snapshot files
// reference: https://docs.rs/walkdir

use crate::error::{Result, ScanError, SurfaceError};
use crate::models::{Attachment, FilingMeta, PressRelease, PressReleases};
use crate::source::{FilingHandle, FilingSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// A filing with its surfaces inlined. A `null` text or content stands for
/// a surface that cannot be fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFiling {
    #[serde(flatten)]
    pub meta: FilingMeta,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<SnapshotAttachment>,
    /// Simulates a failure to enumerate attachments.
    #[serde(default)]
    pub attachments_error: Option<String>,
    /// `None` when the filing has no press-release capability.
    #[serde(default)]
    pub press_releases: Option<Vec<SnapshotPressRelease>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotAttachment {
    #[serde(flatten)]
    pub attachment: Attachment,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPressRelease {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl SnapshotFiling {
    pub fn new(meta: FilingMeta, text: Option<&str>) -> Self {
        Self {
            meta,
            text: text.map(str::to_string),
            attachments: Vec::new(),
            attachments_error: None,
            press_releases: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment, content: Option<&str>) -> Self {
        self.attachments.push(SnapshotAttachment {
            attachment,
            content: content.map(str::to_string),
        });
        self
    }

    pub fn with_press_release(mut self, document: &str, content: Option<&str>) -> Self {
        self.press_releases
            .get_or_insert_with(Vec::new)
            .push(SnapshotPressRelease {
                document: document.to_string(),
                content: content.map(str::to_string),
            });
        self
    }
}

impl FilingHandle for SnapshotFiling {
    fn meta(&self) -> &FilingMeta {
        &self.meta
    }

    fn primary_text(&self) -> std::result::Result<String, SurfaceError> {
        self.text
            .clone()
            .ok_or_else(|| SurfaceError::Unavailable("primary text missing from snapshot".into()))
    }

    fn attachments(&self) -> std::result::Result<Vec<Attachment>, SurfaceError> {
        if let Some(reason) = &self.attachments_error {
            return Err(SurfaceError::Fetch(reason.clone()));
        }
        Ok(self
            .attachments
            .iter()
            .map(|a| a.attachment.clone())
            .collect())
    }

    fn attachment_content(
        &self,
        attachment: &Attachment,
    ) -> std::result::Result<String, SurfaceError> {
        self.attachments
            .iter()
            .find(|a| &a.attachment == attachment)
            .and_then(|a| a.content.clone())
            .ok_or_else(|| {
                SurfaceError::Unavailable(format!("no content for {}", attachment.label()))
            })
    }

    fn press_releases(&self) -> std::result::Result<PressReleases, SurfaceError> {
        let Some(releases) = &self.press_releases else {
            return Ok(PressReleases::Absent);
        };
        if releases.is_empty() {
            return Ok(PressReleases::NotIncluded);
        }

        Ok(PressReleases::Included(
            releases
                .iter()
                .map(|r| PressRelease {
                    document: r.document.clone(),
                    content: r.content.clone().ok_or_else(|| {
                        SurfaceError::Unavailable(format!("no content for {}", r.document))
                    }),
                })
                .collect(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    filings: Vec<SnapshotFiling>,
}

impl SnapshotSource {
    pub fn from_filings(filings: Vec<SnapshotFiling>) -> Self {
        Self { filings }
    }

    /// Loads one JSON file, or every `*.json` below a directory in path order.
    /// Each file holds an array of filings.
    pub fn load(path: &Path) -> Result<Self> {
        let mut files = Vec::new();

        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.to_path_buf());
        }

        let mut filings = Vec::new();
        for file in &files {
            let raw = fs::read_to_string(file).map_err(|source| ScanError::FileOperation {
                path: file.clone(),
                source,
            })?;
            let batch: Vec<SnapshotFiling> = serde_json::from_str(&raw)?;
            debug!("Loaded {} filings from {}", batch.len(), file.display());
            filings.extend(batch);
        }

        info!(
            "Snapshot source ready: {} filings from {} files",
            filings.len(),
            files.len()
        );
        Ok(Self { filings })
    }

    pub fn len(&self) -> usize {
        self.filings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }
}

impl FilingSource for SnapshotSource {
    type Filing = SnapshotFiling;

    fn list_filings(&self, form: &str, date: NaiveDate) -> Result<Vec<SnapshotFiling>> {
        Ok(self
            .filings
            .iter()
            .filter(|f| f.meta.form.eq_ignore_ascii_case(form) && f.meta.filing_date == date)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"[
        {
            "company": "Acme Corp",
            "cik": 1001,
            "filing_date": "2025-08-08",
            "accession_no": "0001001-25-000001",
            "form": "8-K",
            "items": "Item 1.01, Item 9.01",
            "text": "Agreement and Plan of Merger",
            "attachments": [
                {"document": "ex991.htm", "type": "EX-99.1", "content": "press text"},
                {"document": "logo.jpg", "type": "GRAPHIC"}
            ],
            "press_releases": [{"document": "ex991.htm", "content": "press text"}]
        },
        {
            "company": "Beta LLC",
            "cik": 1002,
            "filing_date": "2025-08-08",
            "accession_no": "0001002-25-000001",
            "form": "SC 13D",
            "text": null
        },
        {
            "company": "Gamma Inc",
            "cik": 1003,
            "filing_date": "2025-08-07",
            "accession_no": "0001003-25-000001",
            "form": "8-K",
            "text": "other day"
        }
    ]"#;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn test_load_directory_and_filter() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("day.json"), SNAPSHOT).unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let source = SnapshotSource::load(temp.path()).unwrap();
        assert_eq!(source.len(), 3);

        let eight_k = source.list_filings("8-K", date(8)).unwrap();
        assert_eq!(eight_k.len(), 1);
        assert_eq!(eight_k[0].meta().company, "Acme Corp");
        assert_eq!(eight_k[0].items().as_deref(), Some("Item 1.01, Item 9.01"));

        let schedules = source.list_filings("sc 13d", date(8)).unwrap();
        assert_eq!(schedules.len(), 1);
        assert!(schedules[0].primary_text().is_err());
    }

    #[test]
    fn test_surfaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("day.json");
        fs::write(&path, SNAPSHOT).unwrap();

        let source = SnapshotSource::load(&path).unwrap();
        let filing = &source.list_filings("8-K", date(8)).unwrap()[0];

        let attachments = filing.attachments().unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].kind, "EX-99.1");
        assert_eq!(filing.attachment_content(&attachments[0]).unwrap(), "press text");
        assert!(filing.attachment_content(&attachments[1]).is_err());

        match filing.press_releases().unwrap() {
            PressReleases::Included(releases) => assert_eq!(releases.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_press_release_capability_states() {
        let meta = FilingMeta {
            company: "Delta".to_string(),
            cik: 1,
            filing_date: date(8),
            accession_no: "a".to_string(),
            form: "8-K".to_string(),
            items: None,
            url: None,
        };
        let bare = SnapshotFiling::new(meta.clone(), Some("text"));
        assert_eq!(bare.press_releases().unwrap(), PressReleases::Absent);

        let mut none = SnapshotFiling::new(meta, Some("text"));
        none.press_releases = Some(vec![]);
        assert_eq!(none.press_releases().unwrap(), PressReleases::NotIncluded);
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SnapshotSource::load(&path),
            Err(ScanError::Serialization(_))
        ));
    }
}
