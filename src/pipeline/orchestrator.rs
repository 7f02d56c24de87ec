// file: src/pipeline/orchestrator.rs
// description: coordinates filing listing, surface scanning, classification and aggregation
// reference: single-threaded batch scan over one filing date

use crate::error::Result;
use crate::matching::{MatchMode, PatternRegistry, SituationClassifier, TextMatcher};
use crate::models::{HitRow, ResultTable, TableSchema, WhereFound};
use crate::pipeline::progress::{ProgressTracker, ScanStats};
use crate::scanner::{FilingSurfaceScanner, ScanOptions};
use crate::source::{FilingHandle, FilingSource};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const MERGER_ACQUISITION_FORM: &str = "8-K";

const DEFAULT_PROGRESS_INTERVAL: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub table: ResultTable,
    pub stats: ScanStats,
}

#[derive(Debug, Clone, Copy)]
enum ScanKind {
    MergerAcquisition { require_both: bool },
    SpecialSituations,
}

impl ScanKind {
    fn mode(&self) -> MatchMode {
        match self {
            ScanKind::MergerAcquisition { require_both } => MatchMode::TwoTerm {
                require_both: *require_both,
            },
            ScanKind::SpecialSituations => MatchMode::Extended,
        }
    }

    fn schema(&self) -> TableSchema {
        match self {
            ScanKind::MergerAcquisition { .. } => TableSchema::MergerAcquisition,
            ScanKind::SpecialSituations => TableSchema::SpecialSituations,
        }
    }
}

pub struct ScanOrchestrator<'a, S: FilingSource> {
    source: &'a S,
    registry: &'a PatternRegistry,
    progress_interval: usize,
    show_progress: bool,
}

impl<'a, S: FilingSource> ScanOrchestrator<'a, S> {
    pub fn new(source: &'a S, registry: &'a PatternRegistry) -> Self {
        Self {
            source,
            registry,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            show_progress: false,
        }
    }

    pub fn with_progress_interval(mut self, every: usize) -> Self {
        self.progress_interval = every.max(1);
        self
    }

    pub fn with_progress_bar(mut self, visible: bool) -> Self {
        self.show_progress = visible;
        self
    }

    /// 8-K filings on `date` mentioning `merger(s)` or `acquisition(s)`.
    pub fn scan_for_merger_acquisition(
        &self,
        date: NaiveDate,
        require_both: bool,
        include_exhibits: bool,
        max_filings: Option<usize>,
    ) -> Result<ResultTable> {
        self.run_merger_acquisition(date, require_both, include_exhibits, max_filings)
            .map(|report| report.table)
    }

    pub fn run_merger_acquisition(
        &self,
        date: NaiveDate,
        require_both: bool,
        include_exhibits: bool,
        max_filings: Option<usize>,
    ) -> Result<ScanReport> {
        info!(
            "Starting 8-K scan for date={} (require_both={}, include_exhibits={}, max_filings={:?})",
            date, require_both, include_exhibits, max_filings
        );

        let options = ScanOptions {
            include_exhibits,
            include_press_releases: true,
        };
        self.run(
            date,
            &[MERGER_ACQUISITION_FORM],
            ScanKind::MergerAcquisition { require_both },
            options,
            max_filings,
        )
    }

    /// Filings of each form on `date` mentioning any special-situation term,
    /// each labelled with a category derived from its primary text.
    pub fn scan_for_special_situations<F: AsRef<str>>(
        &self,
        date: NaiveDate,
        forms: &[F],
        include_exhibits: bool,
        max_filings: Option<usize>,
    ) -> Result<ResultTable> {
        self.run_special_situations(date, forms, include_exhibits, max_filings)
            .map(|report| report.table)
    }

    pub fn scan_for_special_situations_form(
        &self,
        date: NaiveDate,
        form: &str,
        include_exhibits: bool,
        max_filings: Option<usize>,
    ) -> Result<ResultTable> {
        self.scan_for_special_situations(date, &[form], include_exhibits, max_filings)
    }

    pub fn run_special_situations<F: AsRef<str>>(
        &self,
        date: NaiveDate,
        forms: &[F],
        include_exhibits: bool,
        max_filings: Option<usize>,
    ) -> Result<ScanReport> {
        info!(
            "Starting special-situations scan for date={} over {} forms (include_exhibits={}, max_filings={:?})",
            date,
            forms.len(),
            include_exhibits,
            max_filings
        );

        let options = ScanOptions {
            include_exhibits,
            include_press_releases: false,
        };
        self.run(
            date,
            forms,
            ScanKind::SpecialSituations,
            options,
            max_filings,
        )
    }

    fn run<F: AsRef<str>>(
        &self,
        date: NaiveDate,
        forms: &[F],
        kind: ScanKind,
        options: ScanOptions,
        max_filings: Option<usize>,
    ) -> Result<ScanReport> {
        let start = Instant::now();
        let scanner = FilingSurfaceScanner::new(TextMatcher::new(self.registry));
        let classifier = SituationClassifier::new(self.registry);
        let mode = kind.mode();

        let mut stats = ScanStats::new();
        let mut rows: Vec<HitRow> = Vec::new();

        for form in forms {
            let form: &str = form.as_ref();
            let mut filings = self.source.list_filings(form, date)?;
            info!("Fetched {} {} filings for {}", filings.len(), form, date);
            stats.forms_scanned += 1;
            stats.filings_listed += filings.len();

            if let Some(max) = max_filings {
                filings.truncate(max);
                info!("Limiting scan to the first {} {} filings", max, form);
            }

            let total = filings.len();
            let progress = ProgressTracker::new(total, self.show_progress);
            progress.set_message(format!("Scanning {}", form));

            for (idx, filing) in filings.iter().enumerate().map(|(i, f)| (i + 1, f)) {
                let outcome = scanner.scan(filing, mode, options);
                stats.filings_scanned += 1;
                stats.surfaces_checked += outcome.surfaces_checked;
                stats.surface_failures += outcome.surface_failures;

                if outcome.is_hit() {
                    stats.filings_matched += 1;
                    rows.push(self.build_row(filing, &outcome.where_found, kind, &classifier));
                }

                progress.inc(stats.filings_matched);
                if idx % self.progress_interval == 0 {
                    info!("Scanned {}/{} {} filings...", idx, total, form);
                }
            }

            progress.finish();
            debug!(
                "Scanned {} {} filings in {:.2}s",
                progress.position(),
                form,
                progress.elapsed_secs()
            );
        }

        stats.duration_secs = start.elapsed().as_secs_f64();

        if stats.surface_failures > 0 {
            warn!(
                "{} filing surfaces could not be read and were treated as non-matching",
                stats.surface_failures
            );
        }

        let table = if rows.is_empty() {
            ResultTable::empty(kind.schema())
        } else {
            ResultTable::from_rows(kind.schema(), rows)
        };
        info!("Found {} matching filings for {}", table.len(), date);

        Ok(ScanReport { table, stats })
    }

    fn build_row(
        &self,
        filing: &S::Filing,
        where_found: &WhereFound,
        kind: ScanKind,
        classifier: &SituationClassifier<'_>,
    ) -> HitRow {
        let meta = filing.meta();
        let mut row = HitRow::new(meta, where_found);

        match kind {
            ScanKind::MergerAcquisition { .. } => {
                row.items = filing.items();
                row
            }
            ScanKind::SpecialSituations => {
                let primary = filing.primary_text().ok();
                let category = classifier.classify(primary.as_deref());
                row.with_classification(&meta.form, category)
            }
        }
    }
}
