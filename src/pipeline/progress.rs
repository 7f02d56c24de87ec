// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for scan execution
// reference: uses indicatif for progress bars and tracks scan metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStats {
    pub forms_scanned: usize,
    pub filings_listed: usize,
    pub filings_scanned: usize,
    pub filings_matched: usize,
    pub surfaces_checked: usize,
    pub surface_failures: usize,
    pub duration_secs: f64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filings_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.filings_scanned as f64 / self.duration_secs
    }

    pub fn hit_rate(&self) -> f64 {
        if self.filings_scanned == 0 {
            return 0.0;
        }
        (self.filings_matched as f64 / self.filings_scanned as f64) * 100.0
    }
}

/// Terminal progress bar for one form's filings. Hidden bars track nothing
/// visible but keep the same call sites.
pub struct ProgressTracker {
    bar: ProgressBar,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_filings: usize, visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(total_filings as u64)
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    pub fn inc(&self, matched: usize) {
        self.bar.inc(1);
        self.bar.set_message(format!("Matched: {}", matched));
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    match ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        Ok(style) => bar.set_style(style.progress_chars("█▓▒░")),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stats_calculations() {
        let stats = ScanStats {
            filings_scanned: 40,
            filings_matched: 10,
            duration_secs: 4.0,
            ..ScanStats::new()
        };

        assert_eq!(stats.filings_per_second(), 10.0);
        assert_eq!(stats.hit_rate(), 25.0);
    }

    #[test]
    fn test_scan_stats_zero_division() {
        let stats = ScanStats::new();
        assert_eq!(stats.filings_per_second(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hidden_tracker_counts() {
        let tracker = ProgressTracker::new(5, false);
        tracker.inc(0);
        tracker.inc(1);
        assert_eq!(tracker.position(), 2);
        tracker.finish();
    }
}
