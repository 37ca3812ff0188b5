//! Filing retrieval across the S&P 500 roster.
//!
//! Companies are processed one at a time with a fixed pause after each, so
//! the run stays under the SEC's request-rate ceiling. A company that fails
//! is logged and counted; the loop moves on.

use super::PipelineError;
use chrono::{Local, NaiveDate};
use tenk::{GicsSector, SP500Universe};
use tenk_data::edgar::{EdgarClient, EdgarClientConfig};
use tenk_data::{Company, FetchConfig, FetchSummary, FilingRetriever};
use tokio::time::sleep;

/// Everything `tenk fetch` needs.
#[derive(Debug, Clone)]
pub(crate) struct FetchSettings {
    /// Page listing the constituents.
    pub(crate) roster_url: String,
    /// HTTP client settings.
    pub(crate) client: EdgarClientConfig,
    /// Output layout and pacing.
    pub(crate) fetch: FetchConfig,
    /// Restrict to these tickers when non-empty.
    pub(crate) tickers: Vec<String>,
    /// Restrict to one sector.
    pub(crate) sector: Option<GicsSector>,
    /// Process at most this many companies.
    pub(crate) limit: Option<usize>,
}

/// Resolve the roster, then fetch every selected company's recent 10-Ks.
pub(crate) async fn run_fetch(settings: FetchSettings) -> Result<FetchSummary, PipelineError> {
    let client = EdgarClient::with_config(settings.client)?;

    tracing::info!(url = %settings.roster_url, "Getting S&P 500 companies list...");
    let universe = SP500Universe::fetch(client.http(), &settings.roster_url).await?;
    tracing::info!(companies = universe.constituents().len(), "Roster resolved");

    let companies = select(
        universe,
        &settings.tickers,
        settings.sector,
        settings.limit,
    )
    .into_constituents();

    let retriever = FilingRetriever::new(client, settings.fetch);
    let today = Local::now().date_naive();

    Ok(fetch_companies(&retriever, &companies, today).await)
}

/// Apply the ticker, sector and limit filters, in that order.
pub(crate) fn select(
    universe: SP500Universe,
    tickers: &[String],
    sector: Option<GicsSector>,
    limit: Option<usize>,
) -> SP500Universe {
    let mut universe = universe;
    if !tickers.is_empty() {
        universe = universe.retain_tickers(tickers);
    }
    if let Some(sector) = sector {
        universe = universe.retain_sector(sector);
    }
    if let Some(limit) = limit {
        universe = universe.truncate(limit);
    }
    universe
}

/// Fetch companies sequentially, pausing after each one.
pub(crate) async fn fetch_companies(
    retriever: &FilingRetriever,
    companies: &[Company],
    today: NaiveDate,
) -> FetchSummary {
    let total = companies.len();
    let mut summary = FetchSummary::default();

    for (idx, company) in companies.iter().enumerate() {
        tracing::info!(
            ticker = %company.ticker,
            name = %company.name,
            "Processing {}/{}",
            idx + 1,
            total
        );

        match retriever.fetch_company(company, today).await {
            Ok(report) => summary.record(&report),
            Err(e) => {
                tracing::error!(ticker = %company.ticker, error = %e, "Error processing company");
                summary.record_failure();
            }
        }

        sleep(retriever.config().company_delay).await;
    }

    summary
}
