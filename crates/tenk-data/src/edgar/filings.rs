//! SEC EDGAR submissions payload.
//!
//! This module provides functionality to:
//! - Pad CIK numbers for `data.sec.gov` URLs
//! - Read a company's recent filing history
//! - Select annual reports (10-K) filed inside a date window

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Form type of the annual report.
pub const ANNUAL_REPORT_FORM: &str = "10-K";

/// Default host of the filing archive.
pub const ARCHIVE_BASE_URL: &str = "https://www.sec.gov";

/// Pad CIK to 10 digits as required by SEC.
///
/// SEC EDGAR data URLs require CIKs to be zero-padded to 10 digits.
///
/// # Example
/// ```
/// # use tenk_data::edgar::filings::pad_cik;
/// assert_eq!(pad_cik("320193"), "0000320193");
/// ```
pub fn pad_cik(cik: &str) -> String {
    format!("{:0>10}", cik)
}

/// Company filings data from SEC EDGAR submissions API.
///
/// Every section is optional: filers with no history come back without a
/// `filings.recent` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyFilings {
    /// Central Index Key
    #[serde(default)]
    pub cik: String,
    /// Company name
    #[serde(default)]
    pub name: String,
    /// Filing history
    #[serde(default)]
    pub filings: Option<FilingHistory>,
}

/// Container for filing history data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingHistory {
    /// Recent filings
    #[serde(default)]
    pub recent: Option<RecentFilings>,
}

/// Recent filings data.
///
/// The SEC API returns filing information as parallel arrays where
/// each index corresponds to a single filing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (unique filing identifiers)
    #[serde(default)]
    pub accession_number: Vec<String>,
    /// Form types (e.g., "10-K", "10-Q", "8-K")
    #[serde(default)]
    pub form: Vec<String>,
    /// Filing dates in YYYY-MM-DD format
    #[serde(default)]
    pub filing_date: Vec<String>,
    /// Primary document filenames
    #[serde(default)]
    pub primary_document: Vec<String>,
}

impl RecentFilings {
    /// Number of filings present in every parallel array.
    pub fn len(&self) -> usize {
        self.accession_number
            .len()
            .min(self.form.len())
            .min(self.filing_date.len())
            .min(self.primary_document.len())
    }

    /// Whether no complete filing row is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Information about a specific filing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingInfo {
    /// Accession number (unique filing identifier)
    pub accession_number: String,
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Primary document filename
    pub primary_document: String,
}

impl CompanyFilings {
    /// Parse a submissions payload.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse submissions JSON: {}", e)))
    }

    /// The recent filings block, or `None` when it is missing or empty.
    pub fn recent(&self) -> Option<&RecentFilings> {
        self.filings
            .as_ref()
            .and_then(|history| history.recent.as_ref())
            .filter(|recent| !recent.is_empty())
    }

    /// Annual reports filed on or after `since`, in payload order (most recent first).
    pub fn annual_reports_since(&self, since: NaiveDate) -> Vec<FilingInfo> {
        self.filings_by_form(ANNUAL_REPORT_FORM)
            .into_iter()
            .filter(|filing| filing.filing_date >= since)
            .collect()
    }

    /// Find all filings of a specific form type.
    ///
    /// The match is exact, so amendments such as "10-K/A" are not included.
    /// Rows with an unparseable date are skipped.
    pub fn filings_by_form(&self, form_type: &str) -> Vec<FilingInfo> {
        let Some(recent) = self.recent() else {
            return Vec::new();
        };

        let mut filings = Vec::new();
        for i in 0..recent.len() {
            if recent.form[i] != form_type {
                continue;
            }
            match self.filing_at_index(recent, i) {
                Ok(filing) => filings.push(filing),
                Err(e) => tracing::warn!(
                    cik = %self.cik,
                    accession = %recent.accession_number[i],
                    error = %e,
                    "Skipping filing"
                ),
            }
        }

        filings
    }

    /// Extract filing information at a specific index.
    fn filing_at_index(&self, recent: &RecentFilings, idx: usize) -> Result<FilingInfo> {
        let filing_date = NaiveDate::parse_from_str(&recent.filing_date[idx], "%Y-%m-%d")
            .map_err(|e| DataError::Parse(format!("Invalid filing date: {}", e)))?;

        Ok(FilingInfo {
            accession_number: recent.accession_number[idx].clone(),
            form: recent.form[idx].clone(),
            filing_date,
            primary_document: recent.primary_document[idx].clone(),
        })
    }
}

impl FilingInfo {
    /// Get the URL to the primary document for this filing on www.sec.gov.
    ///
    /// # Example
    /// ```
    /// # use tenk_data::edgar::filings::FilingInfo;
    /// # use chrono::NaiveDate;
    /// let filing = FilingInfo {
    ///     accession_number: "0000320193-23-000077".to_string(),
    ///     form: "10-K".to_string(),
    ///     filing_date: NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
    ///     primary_document: "aapl-20230930.htm".to_string(),
    /// };
    /// let url = filing.document_url(320193);
    /// assert!(url.contains("edgar/data/320193"));
    /// ```
    pub fn document_url(&self, cik: u64) -> String {
        self.document_url_at(ARCHIVE_BASE_URL, cik)
    }

    /// Same as [`document_url`](Self::document_url) against another archive host.
    ///
    /// The archive path uses the unpadded CIK and the accession number without dashes.
    pub fn document_url_at(&self, archive_base: &str, cik: u64) -> String {
        let accession_no_dashes = self.accession_number.replace('-', "");

        format!(
            "{}/Archives/edgar/data/{}/{}/{}",
            archive_base.trim_end_matches('/'),
            cik,
            accession_no_dashes,
            self.primary_document
        )
    }
}
