//! SEC EDGAR data fetching and parsing.
//!
//! This module provides access to SEC EDGAR filings including:
//! - Company submissions (filing history) by CIK
//! - 10-K filing selection and archive document retrieval
//! - XBRL company facts
//!
//! # Example
//!
//! ```no_run
//! use tenk_data::edgar::EdgarClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new()?;
//!     let filings = client.get_company_filings(320193).await?;
//!     for filing in filings.filings_by_form("10-K") {
//!         println!("{} {}", filing.filing_date, filing.document_url(320193));
//!     }
//!
//!     let facts = client.get_company_facts(320193).await?;
//!     println!("{} concepts", facts.concept_count());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod filings;
pub mod xbrl;

// Re-export main types
pub use client::{
    DEFAULT_USER_AGENT, EdgarClient, EdgarClientConfig, EdgarEndpoints, USER_AGENT_ENV,
    user_agent_from_env, user_agent_or_default,
};
pub use filings::{ANNUAL_REPORT_FORM, CompanyFilings, FilingHistory, FilingInfo, RecentFilings};
pub use xbrl::CompanyFacts;
