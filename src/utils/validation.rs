// file: src/utils/validation.rs
// description: input validation for dates, form types, identities and sheet names
// reference: input validation patterns

use crate::error::{Result, ScanError};
use chrono::NaiveDate;
use std::path::Path;

pub struct Validator;

impl Validator {
    /// Parses a `YYYY-MM-DD` filing date.
    pub fn parse_filing_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
            ScanError::Validation(format!(
                "Invalid filing date '{}' (expected YYYY-MM-DD): {}",
                value, e
            ))
        })
    }

    pub fn validate_form_type(form: &str) -> Result<()> {
        let form = form.trim();
        if form.is_empty() {
            return Err(ScanError::Validation("Form type is empty".to_string()));
        }

        if !form
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | ' ' | '.'))
        {
            return Err(ScanError::Validation(format!(
                "Invalid form type: {}",
                form
            )));
        }

        Ok(())
    }

    /// EDGAR expects "Name email@host".
    pub fn validate_identity(identity: &str) -> Result<()> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(ScanError::Validation("Identity is empty".to_string()));
        }

        if !identity.split_whitespace().any(|part| part.contains('@')) {
            return Err(ScanError::Validation(format!(
                "Identity should include a contact email: {}",
                identity
            )));
        }

        Ok(())
    }

    /// Spreadsheet keys and tab names become path components.
    pub fn validate_sheet_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ScanError::Validation("Sheet name is empty".to_string()));
        }

        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ScanError::Validation(format!(
                "Sheet name must not contain path separators: {}",
                name
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ScanError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ScanError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            format!("{}...", text.chars().take(max_chars).collect::<String>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_filing_date() {
        assert_eq!(
            Validator::parse_filing_date("2025-08-08").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 8).unwrap()
        );
        assert!(Validator::parse_filing_date("08/08/2025").is_err());
        assert!(Validator::parse_filing_date("2025-02-30").is_err());
    }

    #[test]
    fn test_validate_form_type() {
        assert!(Validator::validate_form_type("8-K").is_ok());
        assert!(Validator::validate_form_type("SC 13D/A").is_ok());
        assert!(Validator::validate_form_type("").is_err());
        assert!(Validator::validate_form_type("8-K;rm").is_err());
    }

    #[test]
    fn test_validate_identity() {
        assert!(Validator::validate_identity("Jane Analyst jane@example.com").is_ok());
        assert!(Validator::validate_identity("Jane Analyst").is_err());
        assert!(Validator::validate_identity("  ").is_err());
    }

    #[test]
    fn test_validate_sheet_name() {
        assert!(Validator::validate_sheet_name("8K_MA_hits").is_ok());
        assert!(Validator::validate_sheet_name("a/b").is_err());
        assert!(Validator::validate_sheet_name("..").is_err());
        assert!(Validator::validate_sheet_name("").is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("Agreement and Plan of Merger", 9),
            "Agreement..."
        );
    }
}
