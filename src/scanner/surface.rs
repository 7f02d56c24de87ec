// file: src/scanner/surface.rs
// description: probes every textual surface of one filing with per-surface fault isolation
// reference: primary document, exhibits and press releases of an EDGAR filing

use crate::matching::{MatchMode, TextMatcher};
use crate::models::{PressReleases, SurfaceTag, WhereFound};
use crate::source::FilingHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub include_exhibits: bool,
    /// Probe the press-release capability (8-K scan).
    pub include_press_releases: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_exhibits: true,
            include_press_releases: false,
        }
    }
}

/// Matched surfaces of one filing plus how many surfaces could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceOutcome {
    pub where_found: WhereFound,
    pub surfaces_checked: usize,
    pub surface_failures: usize,
}

impl SurfaceOutcome {
    pub fn is_hit(&self) -> bool {
        !self.where_found.is_empty()
    }
}

pub struct FilingSurfaceScanner<'a> {
    matcher: TextMatcher<'a>,
}

impl<'a> FilingSurfaceScanner<'a> {
    pub fn new(matcher: TextMatcher<'a>) -> Self {
        Self { matcher }
    }

    /// Never fails: an unreadable surface counts as a non-matching one.
    pub fn scan<F>(&self, filing: &F, mode: MatchMode, options: ScanOptions) -> SurfaceOutcome
    where
        F: FilingHandle + ?Sized,
    {
        let mut outcome = SurfaceOutcome::default();

        self.scan_primary(filing, mode, &mut outcome);

        if options.include_exhibits {
            self.scan_attachments(filing, mode, &mut outcome);
        }

        if options.include_press_releases {
            self.scan_press_releases(filing, mode, &mut outcome);
        }

        outcome
    }

    fn scan_primary<F>(&self, filing: &F, mode: MatchMode, outcome: &mut SurfaceOutcome)
    where
        F: FilingHandle + ?Sized,
    {
        let meta = filing.meta();
        outcome.surfaces_checked += 1;

        match filing.primary_text() {
            Ok(text) => {
                if self.matcher.matches(Some(text.as_str()), mode) {
                    outcome.where_found.insert(SurfaceTag::Primary);
                }
            }
            Err(e) => {
                outcome.surface_failures += 1;
                warn!(
                    surface = "primary",
                    "Primary text failed for {} ({}): {}",
                    meta.accession_no,
                    meta.company,
                    e
                );
            }
        }
    }

    fn scan_attachments<F>(&self, filing: &F, mode: MatchMode, outcome: &mut SurfaceOutcome)
    where
        F: FilingHandle + ?Sized,
    {
        let meta = filing.meta();

        let attachments = match filing.attachments() {
            Ok(attachments) => attachments,
            Err(e) => {
                outcome.surface_failures += 1;
                warn!(
                    surface = "attachments",
                    "Attachments failed for {}: {}", meta.accession_no, e
                );
                return;
            }
        };

        for attachment in attachments.iter().filter(|a| a.is_scannable()) {
            outcome.surfaces_checked += 1;

            match filing.attachment_content(attachment) {
                Ok(content) => {
                    if self.matcher.matches(Some(content.as_str()), mode) {
                        outcome
                            .where_found
                            .insert(SurfaceTag::Attachment(attachment.label().to_string()));
                    }
                }
                Err(e) => {
                    outcome.surface_failures += 1;
                    debug!(
                        surface = "attachment",
                        "Skip attachment {} for {}: {}",
                        attachment.label(),
                        meta.accession_no,
                        e
                    );
                }
            }
        }
    }

    fn scan_press_releases<F>(&self, filing: &F, mode: MatchMode, outcome: &mut SurfaceOutcome)
    where
        F: FilingHandle + ?Sized,
    {
        let meta = filing.meta();

        let releases = match filing.press_releases() {
            Ok(PressReleases::Included(releases)) => releases,
            Ok(PressReleases::Absent | PressReleases::NotIncluded) => return,
            Err(e) => {
                outcome.surface_failures += 1;
                debug!(
                    surface = "press_release",
                    "Press releases not available for {}: {}", meta.accession_no, e
                );
                return;
            }
        };

        for release in releases {
            outcome.surfaces_checked += 1;

            match release.content {
                Ok(content) => {
                    if self.matcher.matches(Some(content.as_str()), mode) {
                        outcome.where_found.insert(SurfaceTag::PressRelease);
                    }
                }
                Err(e) => {
                    outcome.surface_failures += 1;
                    debug!(
                        surface = "press_release",
                        "Skip press release {} for {}: {}",
                        release.document,
                        meta.accession_no,
                        e
                    );
                }
            }
        }
    }
}

impl Default for FilingSurfaceScanner<'static> {
    fn default() -> Self {
        Self::new(TextMatcher::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, FilingMeta};
    use crate::source::SnapshotFiling;
    use chrono::NaiveDate;

    const EITHER: MatchMode = MatchMode::TwoTerm {
        require_both: false,
    };

    const WITH_PRESS: ScanOptions = ScanOptions {
        include_exhibits: true,
        include_press_releases: true,
    };

    fn filing(text: Option<&str>) -> SnapshotFiling {
        SnapshotFiling::new(
            FilingMeta {
                company: "Acme Corp".to_string(),
                cik: 1001,
                filing_date: NaiveDate::from_ymd_opt(2025, 8, 8).unwrap(),
                accession_no: "0001001-25-000007".to_string(),
                form: "8-K".to_string(),
                items: None,
                url: None,
            },
            text,
        )
    }

    #[test]
    fn test_primary_failure_still_scans_attachments() {
        let filing = filing(None).with_attachment(
            Attachment::new("ex991.htm", "EX-99.1"),
            Some("closing of the acquisition"),
        );

        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, WITH_PRESS);
        assert_eq!(outcome.where_found.joined(), "attachment:ex991.htm");
        assert_eq!(outcome.surface_failures, 1);
    }

    #[test]
    fn test_no_match_yields_empty_set() {
        let filing = filing(Some("quarterly results"))
            .with_attachment(Attachment::new("ex991.htm", "EX-99.1"), Some("dividend"));

        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, WITH_PRESS);
        assert!(!outcome.is_hit());
        assert_eq!(outcome.surfaces_checked, 2);
    }

    #[test]
    fn test_all_surfaces_deduplicated_and_sorted() {
        let filing = filing(Some("Plan of Merger"))
            .with_attachment(Attachment::new("ex992.htm", "EX-99.2"), Some("merger"))
            .with_attachment(Attachment::new("ex991.htm", "EX-99.1"), Some("acquisition"))
            .with_press_release("ex991.htm", Some("acquisition"))
            .with_press_release("ex993.htm", Some("mergers"));

        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, WITH_PRESS);
        assert_eq!(
            outcome.where_found.joined(),
            "attachment:ex991.htm; attachment:ex992.htm; press_release; primary"
        );
    }

    #[test]
    fn test_ineligible_and_unreadable_attachments_skipped() {
        let filing = filing(Some("nothing here"))
            .with_attachment(Attachment::new("logo.jpg", "GRAPHIC"), Some("merger"))
            .with_attachment(Attachment::new("ex21.htm", "EX-21"), None)
            .with_attachment(Attachment::new("", "EX-99.1"), Some("merger"));

        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, WITH_PRESS);
        assert_eq!(outcome.where_found.joined(), "attachment:EX-99.1");
        assert_eq!(outcome.surface_failures, 1);
    }

    #[test]
    fn test_exhibits_disabled() {
        let filing = filing(Some("nothing here"))
            .with_attachment(Attachment::new("ex991.htm", "EX-99.1"), Some("merger"));

        let options = ScanOptions {
            include_exhibits: false,
            include_press_releases: false,
        };
        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, options);
        assert!(!outcome.is_hit());
    }

    #[test]
    fn test_attachment_enumeration_failure_does_not_abort() {
        let mut filing = filing(Some("merger agreement"));
        filing.attachments_error = Some("index unavailable".to_string());

        let outcome = FilingSurfaceScanner::default().scan(&filing, EITHER, WITH_PRESS);
        assert_eq!(outcome.where_found.joined(), "primary");
        assert_eq!(outcome.surface_failures, 1);
    }

    #[test]
    fn test_press_releases_ignored_without_option() {
        let filing = filing(Some("nothing")).with_press_release("ex991.htm", Some("merger"));

        let outcome =
            FilingSurfaceScanner::default().scan(&filing, EITHER, ScanOptions::default());
        assert!(!outcome.is_hit());
    }

    #[test]
    fn test_extended_mode() {
        let filing = filing(Some("Schedule 13E-3 transaction statement"));
        let outcome =
            FilingSurfaceScanner::default().scan(&filing, MatchMode::Extended, ScanOptions::default());
        assert_eq!(outcome.where_found.joined(), "primary");
    }
}
