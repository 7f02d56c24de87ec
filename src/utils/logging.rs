// file: src/utils/logging.rs
// description: tracing subscriber setup and colored status lines for the cli

use crate::error::{Result, ScanError};
use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy)]
pub struct LogOptions {
    pub colored: bool,
    pub verbose: bool,
    /// Include source file and line in every event.
    pub with_location: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false,
            with_location: true,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logger(options: LogOptions) -> Result<()> {
    let level = if options.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(options.with_location)
        .with_line_number(options.with_location)
        .compact()
        .with_ansi(options.colored)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ScanError::Config(format!("logger already initialized: {}", e)))
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

/// One hit line for the terminal summary: company, date, then provenance.
pub fn format_hit(index: usize, company: &str, filing_date: &str, detail: &str) -> String {
    format!(
        "{:>3} {} {} {}",
        index.to_string().dimmed(),
        company.bold(),
        filing_date.cyan(),
        detail
    )
}
