//! 10-K retrieval into the on-disk filing layout.
//!
//! For each company the retriever reads the submissions payload, keeps the
//! 10-K filings of the trailing year and writes, per filing:
//!
//! ```text
//! <data_dir>/<TICKER>/10K_<YYYY-MM-DD>/filing.html
//! <data_dir>/<TICKER>/10K_<YYYY-MM-DD>/xbrl_data.json
//! ```
//!
//! The two downloads of a filing are independent: one failing is logged and
//! counted, and the other still runs. Existing files are overwritten.

use crate::company::Company;
use crate::edgar::client::EdgarClient;
use crate::edgar::filings::FilingInfo;
use crate::error::Result;
use chrono::{Duration as ChronoDuration, NaiveDate};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;

/// Default root of the filing tree.
pub const DEFAULT_DATA_DIR: &str = "data/sec_filings";

/// File name of the primary filing document.
pub const FILING_HTML: &str = "filing.html";

/// File name of the company-facts document.
pub const XBRL_JSON: &str = "xbrl_data.json";

/// Length of the trailing filing window, in days.
pub const WINDOW_DAYS: i64 = 365;

/// Pause after each filing and each company (SEC allows 10 requests per second).
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Configuration for filing retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Root of the filing tree.
    pub data_dir: PathBuf,
    /// Pause after each filing's downloads.
    pub filing_delay: Duration,
    /// Pause after each company.
    pub company_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            filing_delay: DEFAULT_DELAY,
            company_delay: DEFAULT_DELAY,
        }
    }
}

/// First filing date inside the trailing window ending at `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today - ChronoDuration::days(WINDOW_DAYS)
}

/// Directory holding one filing: `<root>/<TICKER>/10K_<YYYY-MM-DD>`.
pub fn filing_dir(root: &Path, ticker: &str, filing_date: NaiveDate) -> PathBuf {
    root.join(ticker)
        .join(format!("10K_{}", filing_date.format("%Y-%m-%d")))
}

/// What happened for one company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyReport {
    /// Ticker of the company.
    pub ticker: String,
    /// 10-K filings inside the window.
    pub matched: usize,
    /// `filing.html` files written.
    pub documents_written: usize,
    /// `xbrl_data.json` files written.
    pub facts_written: usize,
    /// Sub-downloads that failed.
    pub failures: usize,
}

impl CompanyReport {
    fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            ..Self::default()
        }
    }
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Companies processed, including failed ones.
    pub companies: usize,
    /// Companies whose submissions could not be read.
    pub companies_failed: usize,
    /// 10-K filings inside the window.
    pub filings: usize,
    /// `filing.html` files written.
    pub documents_written: usize,
    /// `xbrl_data.json` files written.
    pub facts_written: usize,
    /// Sub-downloads that failed.
    pub download_failures: usize,
}

impl FetchSummary {
    /// Add a finished company.
    pub fn record(&mut self, report: &CompanyReport) {
        self.companies += 1;
        self.filings += report.matched;
        self.documents_written += report.documents_written;
        self.facts_written += report.facts_written;
        self.download_failures += report.failures;
    }

    /// Add a company that failed before any filing was processed.
    pub const fn record_failure(&mut self) {
        self.companies += 1;
        self.companies_failed += 1;
    }
}

/// Downloads recent 10-K filings for companies, one at a time.
#[derive(Debug)]
pub struct FilingRetriever {
    client: EdgarClient,
    config: FetchConfig,
}

impl FilingRetriever {
    /// Create a retriever.
    pub const fn new(client: EdgarClient, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Retrieval settings.
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// The EDGAR client.
    pub const fn client(&self) -> &EdgarClient {
        &self.client
    }

    /// Fetch the 10-K filings of one company filed in the year up to `today`.
    ///
    /// A company without a recent-filings section, or without 10-Ks in the
    /// window, yields an empty report and no files.
    ///
    /// # Errors
    /// Fails when the submissions payload cannot be fetched or parsed, or a
    /// filing directory cannot be created. Individual downloads never fail
    /// the call.
    pub async fn fetch_company(&self, company: &Company, today: NaiveDate) -> Result<CompanyReport> {
        let mut report = CompanyReport::new(&company.ticker);
        let filings = self.client.get_company_filings(company.cik).await?;

        if filings.recent().is_none() {
            tracing::info!(ticker = %company.ticker, "No recent filings found");
            return Ok(report);
        }

        let since = window_start(today);
        let annual = filings.annual_reports_since(since);
        if annual.is_empty() {
            tracing::info!(ticker = %company.ticker, %since, "No 10-K filings in the past year");
            return Ok(report);
        }
        report.matched = annual.len();

        for filing in &annual {
            let dir = filing_dir(&self.config.data_dir, &company.ticker, filing.filing_date);
            tokio::fs::create_dir_all(&dir).await?;

            match self.download_document(company, filing, &dir).await {
                Ok(()) => report.documents_written += 1,
                Err(e) => {
                    report.failures += 1;
                    tracing::warn!(ticker = %company.ticker, error = %e, "Error downloading HTML");
                }
            }

            match self.download_facts(company, &dir).await {
                Ok(()) => report.facts_written += 1,
                Err(e) => {
                    report.failures += 1;
                    tracing::warn!(ticker = %company.ticker, error = %e, "Error downloading XBRL");
                }
            }

            tracing::info!(
                ticker = %company.ticker,
                date = %filing.filing_date,
                "Downloaded 10-K filing"
            );
            sleep(self.config.filing_delay).await;
        }

        Ok(report)
    }

    async fn download_document(&self, company: &Company, filing: &FilingInfo, dir: &Path) -> Result<()> {
        let document = self.client.get_filing_document(company.cik, filing).await?;
        tokio::fs::write(dir.join(FILING_HTML), document).await?;
        Ok(())
    }

    async fn download_facts(&self, company: &Company, dir: &Path) -> Result<()> {
        let facts = self.client.get_company_facts(company.cik).await?;
        tracing::debug!(
            ticker = %company.ticker,
            entity = facts.entity_name().unwrap_or_default(),
            concepts = facts.concept_count(),
            "Company facts"
        );
        tokio::fs::write(dir.join(XBRL_JSON), facts.to_pretty_json()?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(date(2024, 6, 1)), date(2023, 6, 2));
        assert_eq!(window_start(date(2023, 3, 1)), date(2022, 3, 1));
    }

    #[test]
    fn test_filing_dir() {
        let dir = filing_dir(Path::new("data/sec_filings"), "AAPL", date(2024, 11, 1));
        assert_eq!(dir, PathBuf::from("data/sec_filings/AAPL/10K_2024-11-01"));
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = FetchSummary::default();
        summary.record(&CompanyReport {
            ticker: "AAPL".to_string(),
            matched: 1,
            documents_written: 1,
            facts_written: 0,
            failures: 1,
        });
        summary.record(&CompanyReport::new("MSFT"));
        summary.record_failure();

        assert_eq!(summary.companies, 3);
        assert_eq!(summary.companies_failed, 1);
        assert_eq!(summary.filings, 1);
        assert_eq!(summary.documents_written, 1);
        assert_eq!(summary.facts_written, 0);
        assert_eq!(summary.download_failures, 1);
    }

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/sec_filings"));
        assert_eq!(config.filing_delay, Duration::from_millis(100));
        assert_eq!(config.company_delay, Duration::from_millis(100));
    }
}
