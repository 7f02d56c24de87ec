// file: src/source/edgar.rs
// description: EDGAR filing source over the daily form index and full submission files
// reference: https://www.sec.gov/os/accessing-edgar-data

use crate::config::EdgarConfig;
use crate::error::{Result, ScanError, SurfaceError};
use crate::models::{Attachment, FilingMeta, PressRelease, PressReleases};
use crate::parser::{IndexEntry, Submission, parse_daily_index};
use crate::source::{FilingHandle, FilingSource};
use chrono::{Datelike, NaiveDate};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::cell::OnceCell;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Minimum spacing between EDGAR requests. A zero interval disables pacing.
/// Clones share one limiter.
#[derive(Clone)]
struct RequestPacer {
    limiter: Option<Arc<DirectLimiter>>,
    clock: DefaultClock,
}

impl RequestPacer {
    fn new(interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(interval).map(|quota| Arc::new(RateLimiter::direct(quota))),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks until the next request is allowed.
    fn wait(&self) {
        let Some(limiter) = &self.limiter else {
            return;
        };
        while let Err(not_until) = limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }
}

/// Blocking HTTP access to the EDGAR archives.
#[derive(Clone)]
struct EdgarHttp {
    client: Client,
    archives_url: String,
    pacer: RequestPacer,
}

impl EdgarHttp {
    fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.pacer.wait();
        debug!("GET {}", url);
        self.client.get(url).send()
    }
}

pub struct EdgarSource {
    http: EdgarHttp,
}

impl EdgarSource {
    /// Requires a declared identity; EDGAR rejects anonymous clients.
    pub fn new(config: &EdgarConfig) -> Result<Self> {
        let identity = config
            .identity
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ScanError::Config(
                    "EDGAR identity is required (set EDGAR_IDENTITY to \"Name email@host\")"
                        .to_string(),
                )
            })?;

        let client = Client::builder()
            .user_agent(identity)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http: EdgarHttp {
                client,
                archives_url: config.archives_url.trim_end_matches('/').to_string(),
                pacer: RequestPacer::new(Duration::from_millis(config.request_interval_ms)),
            },
        })
    }

    fn daily_index_url(&self, date: NaiveDate) -> String {
        daily_index_url(&self.http.archives_url, date)
    }
}

impl FilingSource for EdgarSource {
    type Filing = EdgarFiling;

    fn list_filings(&self, form: &str, date: NaiveDate) -> Result<Vec<EdgarFiling>> {
        let provider_error = |message: String| ScanError::Provider {
            form: form.to_string(),
            date,
            message,
        };

        let url = self.daily_index_url(date);
        let response = self
            .http
            .get(&url)
            .map_err(|e| provider_error(e.to_string()))?;

        // No index is published for weekends and holidays.
        if response.status() == StatusCode::NOT_FOUND {
            info!("No EDGAR daily index for {}", date);
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(provider_error(format!(
                "daily index request returned {}",
                response.status()
            )));
        }

        let body = response.text().map_err(|e| provider_error(e.to_string()))?;
        let filings: Vec<EdgarFiling> = parse_daily_index(&body)
            .into_iter()
            .filter(|entry| entry.form.eq_ignore_ascii_case(form) && entry.filing_date == date)
            .map(|entry| EdgarFiling::new(entry, self.http.clone()))
            .collect();

        debug!("Daily index lists {} {} filings for {}", filings.len(), form, date);
        Ok(filings)
    }
}

/// A filing listed in the daily index. The full submission is fetched once,
/// on first access to any surface, and shared by all of them.
pub struct EdgarFiling {
    meta: FilingMeta,
    submission_url: String,
    http: EdgarHttp,
    submission: OnceCell<std::result::Result<Submission, SurfaceError>>,
}

impl EdgarFiling {
    fn new(entry: IndexEntry, http: EdgarHttp) -> Self {
        let accession_no = entry.accession_no();
        let submission_url = format!("{}/{}", http.archives_url, entry.path);
        let url = filing_index_url(&http.archives_url, entry.cik, &accession_no);

        Self {
            meta: FilingMeta {
                company: entry.company,
                cik: entry.cik,
                filing_date: entry.filing_date,
                accession_no,
                form: entry.form,
                items: None,
                url: Some(url),
            },
            submission_url,
            http,
            submission: OnceCell::new(),
        }
    }

    fn submission(&self) -> std::result::Result<&Submission, SurfaceError> {
        self.submission
            .get_or_init(|| self.fetch_submission())
            .as_ref()
            .map_err(|e| e.clone())
    }

    fn fetch_submission(&self) -> std::result::Result<Submission, SurfaceError> {
        let response = self.http.get(&self.submission_url)?;
        if !response.status().is_success() {
            return Err(SurfaceError::Fetch(format!(
                "{} returned {}",
                self.submission_url,
                response.status()
            )));
        }
        let raw = response.text()?;
        Submission::parse(&raw)
    }

    fn is_current_report(&self) -> bool {
        self.meta.form.to_uppercase().starts_with("8-K")
    }
}

impl FilingHandle for EdgarFiling {
    fn meta(&self) -> &FilingMeta {
        &self.meta
    }

    fn primary_text(&self) -> std::result::Result<String, SurfaceError> {
        self.submission()?
            .primary()
            .map(|doc| doc.text.clone())
            .ok_or_else(|| SurfaceError::Unavailable("submission has no primary document".into()))
    }

    fn attachments(&self) -> std::result::Result<Vec<Attachment>, SurfaceError> {
        Ok(self
            .submission()?
            .attachments()
            .iter()
            .map(|doc| Attachment {
                document: doc.filename.clone(),
                kind: doc.kind.clone(),
                description: doc.description.clone(),
            })
            .collect())
    }

    fn attachment_content(
        &self,
        attachment: &Attachment,
    ) -> std::result::Result<String, SurfaceError> {
        self.submission()?
            .attachments()
            .iter()
            .find(|doc| doc.filename == attachment.document && doc.kind == attachment.kind)
            .map(|doc| doc.text.clone())
            .ok_or_else(|| {
                SurfaceError::Unavailable(format!("{} not in submission", attachment.label()))
            })
    }

    fn press_releases(&self) -> std::result::Result<PressReleases, SurfaceError> {
        if !self.is_current_report() {
            return Ok(PressReleases::Absent);
        }

        let releases: Vec<PressRelease> = self
            .submission()?
            .attachments()
            .iter()
            .filter(|doc| doc.is_exhibit_99() && doc.mentions_press_release())
            .map(|doc| PressRelease {
                document: doc.filename.clone(),
                content: Ok(doc.text.clone()),
            })
            .collect();

        if releases.is_empty() {
            Ok(PressReleases::NotIncluded)
        } else {
            Ok(PressReleases::Included(releases))
        }
    }

    fn items(&self) -> Option<String> {
        self.submission().ok().and_then(Submission::items)
    }
}

pub fn daily_index_url(archives_url: &str, date: NaiveDate) -> String {
    let quarter = (date.month() - 1) / 3 + 1;
    format!(
        "{}/edgar/daily-index/{}/QTR{}/form.{}.idx",
        archives_url,
        date.year(),
        quarter,
        date.format("%Y%m%d")
    )
}

pub fn filing_index_url(archives_url: &str, cik: u64, accession_no: &str) -> String {
    format!(
        "{}/edgar/data/{}/{}/{}-index.htm",
        archives_url,
        cik,
        accession_no.replace('-', ""),
        accession_no
    )
}
