// file: src/parser/submission.rs
// description: splits an EDGAR full-submission text file into its documents
// reference: EDGAR SGML submission format (<SEC-HEADER>, <DOCUMENT>, <TEXT>)

use crate::error::SurfaceError;
use crate::parser::text::{html_to_text, looks_like_html, normalize_whitespace};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOCUMENT_BLOCK: Regex = Regex::new(r"(?s)<DOCUMENT>(.*?)(?:</DOCUMENT>|\z)")
        .expect("DOCUMENT_BLOCK regex is valid");

    static ref TEXT_BLOCK: Regex = Regex::new(r"(?s)<TEXT>(.*?)(?:</TEXT>|\z)")
        .expect("TEXT_BLOCK regex is valid");

    static ref ITEM_INFORMATION: Regex = Regex::new(r"(?m)^\s*ITEM INFORMATION:\s*(.+?)\s*$")
        .expect("ITEM_INFORMATION regex is valid");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDocument {
    pub kind: String,
    pub sequence: Option<u32>,
    pub filename: String,
    pub description: Option<String>,
    /// Plain text; HTML bodies are already stripped.
    pub text: String,
}

impl SubmissionDocument {
    pub fn is_exhibit_99(&self) -> bool {
        self.kind.to_uppercase().starts_with("EX-99")
    }

    pub fn mentions_press_release(&self) -> bool {
        let described = self
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains("press release"));
        described || self.text.to_lowercase().contains("press release")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    header: String,
    pub documents: Vec<SubmissionDocument>,
}

impl Submission {
    pub fn parse(raw: &str) -> Result<Self, SurfaceError> {
        let header = raw
            .find("<DOCUMENT>")
            .map(|idx| &raw[..idx])
            .unwrap_or(raw)
            .to_string();

        let documents: Vec<SubmissionDocument> = DOCUMENT_BLOCK
            .captures_iter(raw)
            .map(|caps| parse_document(&caps[1]))
            .collect();

        if documents.is_empty() {
            return Err(SurfaceError::Decode(
                "submission contains no <DOCUMENT> blocks".to_string(),
            ));
        }

        Ok(Self { header, documents })
    }

    pub fn primary(&self) -> Option<&SubmissionDocument> {
        self.documents.first()
    }

    /// Every document after the primary one.
    pub fn attachments(&self) -> &[SubmissionDocument] {
        self.documents.get(1..).unwrap_or(&[])
    }

    /// `ITEM INFORMATION` header lines joined with `, `.
    pub fn items(&self) -> Option<String> {
        let items: Vec<&str> = ITEM_INFORMATION
            .captures_iter(&self.header)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(items.join(", "))
        }
    }
}

fn parse_document(block: &str) -> SubmissionDocument {
    let body = TEXT_BLOCK
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("");

    let text = if looks_like_html(body) {
        html_to_text(body)
    } else {
        normalize_whitespace(body)
    };

    SubmissionDocument {
        kind: tag_value(block, "TYPE").unwrap_or_default(),
        sequence: tag_value(block, "SEQUENCE").and_then(|s| s.parse().ok()),
        filename: tag_value(block, "FILENAME").unwrap_or_default(),
        description: tag_value(block, "DESCRIPTION"),
        text,
    }
}

/// Value of a single-line SGML tag such as `<TYPE>EX-99.1`, read from the
/// part of the block before `<TEXT>`.
fn tag_value(block: &str, tag: &str) -> Option<String> {
    let head = block.split("<TEXT>").next().unwrap_or(block);
    let marker = format!("<{}>", tag);

    head.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(marker.as_str()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
