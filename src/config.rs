// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ScanError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub edgar: EdgarConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgarConfig {
    /// `User-Agent` sent to EDGAR, e.g. "Jane Analyst jane@example.com".
    pub identity: Option<String>,
    pub archives_url: String,
    pub request_interval_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub forms: Vec<String>,
    pub include_exhibits: bool,
    pub require_both: bool,
    pub max_filings: Option<usize>,
    pub progress_interval: usize,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    pub root_dir: PathBuf,
    pub spreadsheet_key: Option<String>,
    pub worksheet_name: String,
    pub rows: usize,
    pub min_cols: usize,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            identity: None,
            archives_url: "https://www.sec.gov/Archives".to_string(),
            request_interval_ms: 110,
            timeout_secs: 30,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            forms: vec![
                "8-K".to_string(),
                "SC 13D".to_string(),
                "SC TO-T".to_string(),
                "SC 13E3".to_string(),
            ],
            include_exhibits: true,
            require_both: false,
            max_filings: None,
            progress_interval: 10,
            show_progress: true,
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./sheets"),
            spreadsheet_key: None,
            worksheet_name: "8K_MA_hits".to_string(),
            rows: 100,
            min_cols: 10,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("FILING_SCAN")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    /// Honors the bare `EDGAR_IDENTITY`, `SPREADSHEET_KEY` and
    /// `WORKSHEET_NAME` variables on top of the layered settings.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(identity) = non_empty("EDGAR_IDENTITY") {
            self.edgar.identity = Some(identity);
        }
        if let Some(key) = non_empty("SPREADSHEET_KEY") {
            self.sink.spreadsheet_key = Some(key);
        }
        if let Some(name) = non_empty("WORKSHEET_NAME") {
            self.sink.worksheet_name = name;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.progress_interval == 0 {
            return Err(ScanError::Config(
                "progress_interval must be greater than 0".to_string(),
            ));
        }

        if self.edgar.timeout_secs == 0 {
            return Err(ScanError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.scan.forms.iter().all(|f| f.trim().is_empty()) {
            return Err(ScanError::Config(
                "at least one form type must be configured".to_string(),
            ));
        }

        if self.sink.worksheet_name.trim().is_empty() {
            return Err(ScanError::Config(
                "worksheet_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
