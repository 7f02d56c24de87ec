// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use filing_scan::parser::text::{html_to_text, looks_like_html};
use filing_scan::utils::logging::{
    LogOptions, format_error, format_hit, format_step, format_success, format_warning,
    init_logger,
};
use filing_scan::{
    Config, CsvWorkbook, EdgarSource, FilingSource, JsonExporter, PatternRegistry,
    ScanOrchestrator, ScanReport, SituationClassifier, SnapshotSource, TabCapacity, TableSchema,
    Validator, append_table,
};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const COMPANY_DISPLAY_CHARS: usize = 40;

#[derive(Parser)]
#[command(name = "filing_scan")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Keyword scan and special-situation classification for EDGAR filings", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Read filings from local JSON snapshots instead of EDGAR
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one day's 8-K filings for merger/acquisition language
    Merger {
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long)]
        require_both: bool,

        #[arg(long)]
        no_exhibits: bool,

        #[arg(long, value_name = "NUM")]
        max_filings: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Scan one day's filings of several forms for special-situation language
    Special {
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: String,

        /// Form type to scan; repeatable. Defaults to the configured forms
        #[arg(short, long = "form", value_name = "FORM")]
        forms: Vec<String>,

        #[arg(long)]
        no_exhibits: bool,

        #[arg(long, value_name = "NUM")]
        max_filings: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the special-situation category of a piece of text
    Classify {
        text: Option<String>,

        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Spreadsheet key to append hits to
    #[arg(long, value_name = "KEY")]
    sheet: Option<String>,

    /// Worksheet tab inside the spreadsheet
    #[arg(long, value_name = "NAME")]
    tab: Option<String>,

    /// Directory for a JSON export of the result table
    #[arg(long, value_name = "DIR")]
    json: Option<PathBuf>,

    #[arg(short, long)]
    pretty: bool,
}

enum ScanRequest {
    Merger {
        date: NaiveDate,
        require_both: bool,
        include_exhibits: bool,
        max_filings: Option<usize>,
    },
    Special {
        date: NaiveDate,
        forms: Vec<String>,
        include_exhibits: bool,
        max_filings: Option<usize>,
    },
}

impl ScanRequest {
    fn date(&self) -> NaiveDate {
        match self {
            ScanRequest::Merger { date, .. } | ScanRequest::Special { date, .. } => *date,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(LogOptions {
        colored: cli.color,
        verbose: cli.verbose,
        ..LogOptions::default()
    })
    .context("Failed to initialize logging")?;

    info!("Filing Scan");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Merger {
            date,
            require_both,
            no_exhibits,
            max_filings,
            output,
        } => {
            let request = ScanRequest::Merger {
                date: Validator::parse_filing_date(&date)?,
                require_both: require_both || config.scan.require_both,
                include_exhibits: !no_exhibits && config.scan.include_exhibits,
                max_filings: max_filings.or(config.scan.max_filings),
            };
            cmd_scan(&config, cli.snapshot, request, &output)?;
        }
        Commands::Special {
            date,
            forms,
            no_exhibits,
            max_filings,
            output,
        } => {
            let forms = if forms.is_empty() {
                config.scan.forms.clone()
            } else {
                forms
            };
            for form in &forms {
                Validator::validate_form_type(form)?;
            }

            let request = ScanRequest::Special {
                date: Validator::parse_filing_date(&date)?,
                forms,
                include_exhibits: !no_exhibits && config.scan.include_exhibits,
                max_filings: max_filings.or(config.scan.max_filings),
            };
            cmd_scan(&config, cli.snapshot, request, &output)?;
        }
        Commands::Classify { text, file } => {
            cmd_classify(text, file)?;
        }
    }

    Ok(())
}

fn cmd_scan(
    config: &Config,
    snapshot: Option<PathBuf>,
    request: ScanRequest,
    output: &OutputArgs,
) -> Result<()> {
    let report = match snapshot {
        Some(path) => {
            println!(
                "{}",
                format_step(1, 3, &format!("Loading snapshots from {}", path.display()))
            );
            let source = SnapshotSource::load(&path).context("Failed to load snapshots")?;
            if source.is_empty() {
                println!("{}", format_warning("Snapshot contains no filings"));
            }
            run_scan(&source, config, &request)?
        }
        None => {
            println!("{}", format_step(1, 3, "Connecting to EDGAR"));
            if let Some(identity) = config.edgar.identity.as_deref() {
                Validator::validate_identity(identity)?;
            }
            let source = EdgarSource::new(&config.edgar)
                .context("Failed to create EDGAR source (set EDGAR_IDENTITY)")?;
            run_scan(&source, config, &request)?
        }
    };

    print_summary(&report);

    println!("{}", format_step(3, 3, "Writing results"));
    write_outputs(config, &report, request.date(), output)?;

    Ok(())
}

fn run_scan<S: FilingSource>(
    source: &S,
    config: &Config,
    request: &ScanRequest,
) -> Result<ScanReport> {
    println!("{}", format_step(2, 3, "Scanning filings"));

    let orchestrator = ScanOrchestrator::new(source, PatternRegistry::shared())
        .with_progress_interval(config.scan.progress_interval)
        .with_progress_bar(config.scan.show_progress);

    let report = match request {
        ScanRequest::Merger {
            date,
            require_both,
            include_exhibits,
            max_filings,
        } => orchestrator
            .run_merger_acquisition(*date, *require_both, *include_exhibits, *max_filings)
            .context("Merger/acquisition scan failed")?,
        ScanRequest::Special {
            date,
            forms,
            include_exhibits,
            max_filings,
        } => orchestrator
            .run_special_situations(*date, forms.as_slice(), *include_exhibits, *max_filings)
            .context("Special-situations scan failed")?,
    };

    Ok(report)
}

fn print_summary(report: &ScanReport) {
    let stats = &report.stats;
    let table = &report.table;

    for (index, row) in table.indexed() {
        let detail = match table.schema() {
            TableSchema::MergerAcquisition => row.where_found.clone(),
            TableSchema::SpecialSituations => format!(
                "[{}] {} ({})",
                row.form_type.as_deref().unwrap_or_default(),
                row.classification
                    .map(|c| c.label())
                    .unwrap_or_default(),
                row.where_found
            ),
        };
        println!(
            "{}",
            format_hit(
                index + 1,
                &Validator::truncate_text(&row.company, COMPANY_DISPLAY_CHARS),
                &row.filing_date,
                &detail
            )
        );
    }

    println!(
        "{}",
        format_success(&format!(
            "{} hits from {} filings across {} forms in {:.2}s ({:.1}% hit rate, {:.2} filings/s)",
            table.len(),
            stats.filings_scanned,
            stats.forms_scanned,
            stats.duration_secs,
            stats.hit_rate(),
            stats.filings_per_second()
        ))
    );

    if stats.surface_failures > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} of {} surfaces could not be read",
                stats.surface_failures, stats.surfaces_checked
            ))
        );
    }
}

fn write_outputs(
    config: &Config,
    report: &ScanReport,
    filing_date: NaiveDate,
    output: &OutputArgs,
) -> Result<()> {
    let sheet_key = output
        .sheet
        .clone()
        .or_else(|| config.sink.spreadsheet_key.clone());

    match sheet_key {
        Some(key) => {
            let tab = output
                .tab
                .clone()
                .unwrap_or_else(|| config.sink.worksheet_name.clone());
            Validator::validate_sheet_name(&tab)?;

            let workbook = CsvWorkbook::open_or_create(&config.sink.root_dir, &key)
                .context("Failed to open spreadsheet")?;
            let capacity = TabCapacity {
                rows: config.sink.rows,
                min_cols: config.sink.min_cols,
            };

            match append_table(&report.table, &workbook, &tab, capacity) {
                Ok(appended) => println!(
                    "{}",
                    format_success(&format!("Appended {} rows to {}/{}", appended, key, tab))
                ),
                Err(e) => {
                    println!("{}", format_error(&format!("Append failed: {}", e)));
                    return Err(e).context("Failed to append results");
                }
            }
        }
        None => println!(
            "{}",
            format_warning("No spreadsheet key configured, skipping append")
        ),
    }

    if let Some(dir) = &output.json {
        let exporter = JsonExporter::new(dir.clone())?;
        let manifest = exporter
            .export_table(&report.table, filing_date, &report.stats, output.pretty)
            .context("JSON export failed")?;
        println!(
            "{}",
            format_success(&format!(
                "Exported {} rows to {}",
                manifest.total_rows,
                dir.display()
            ))
        );
    }

    Ok(())
}

fn cmd_classify(text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if looks_like_html(&raw) {
                html_to_text(&raw)
            } else {
                raw
            }
        }
        (None, None) => anyhow::bail!("Provide text to classify or --file PATH"),
    };

    let category = SituationClassifier::new(PatternRegistry::shared()).classify(Some(text.as_str()));
    println!("{}", category);

    Ok(())
}
