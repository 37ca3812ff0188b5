//! SEC EDGAR API client.

use crate::edgar::filings::{ARCHIVE_BASE_URL, CompanyFilings, FilingInfo, pad_cik};
use crate::edgar::xbrl::CompanyFacts;
use crate::error::{DataError, Result};
use std::time::Duration;

/// SEC EDGAR data API base URL
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Environment variable overriding the User-Agent header.
pub const USER_AGENT_ENV: &str = "SEC_USER_AGENT";

/// User agent sent when `SEC_USER_AGENT` is unset (SEC requires identifying information)
pub const DEFAULT_USER_AGENT: &str = "Company/App Name contact@example.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarEndpoints {
    /// Base of the JSON APIs (submissions, company facts).
    pub data_base: String,
    /// Base of the filing archive.
    pub archive_base: String,
}

impl EdgarEndpoints {
    /// Serve every endpoint from one base URL.
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            data_base: base.clone(),
            archive_base: base,
        }
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}{}", self.data_base.trim_end_matches('/'), path)
    }
}

impl Default for EdgarEndpoints {
    fn default() -> Self {
        Self {
            data_base: EDGAR_BASE_URL.to_string(),
            archive_base: ARCHIVE_BASE_URL.to_string(),
        }
    }
}

/// Settings for [`EdgarClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarClientConfig {
    /// Value of the User-Agent header on every request.
    pub user_agent: String,
    /// Request timeout; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Hosts to query.
    pub endpoints: EdgarEndpoints,
}

impl EdgarClientConfig {
    /// Defaults, with the User-Agent taken from `SEC_USER_AGENT` when set.
    pub fn from_env() -> Self {
        Self {
            user_agent: user_agent_from_env(),
            ..Self::default()
        }
    }
}

impl Default for EdgarClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            endpoints: EdgarEndpoints::default(),
        }
    }
}

/// The User-Agent from `SEC_USER_AGENT`, or the built-in fallback.
pub fn user_agent_from_env() -> String {
    user_agent_or_default(std::env::var(USER_AGENT_ENV).ok())
}

/// `value` unless it is missing or blank, else [`DEFAULT_USER_AGENT`].
pub fn user_agent_or_default(value: Option<String>) -> String {
    value
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

/// SEC EDGAR API client.
///
/// Requests are not paced here; callers space them out.
pub struct EdgarClient {
    client: reqwest::Client,
    endpoints: EdgarEndpoints,
}

impl EdgarClient {
    /// Create a new EDGAR client with default settings and the environment's User-Agent.
    pub fn new() -> Result<Self> {
        Self::with_config(EdgarClientConfig::from_env())
    }

    /// Create a new EDGAR client with custom settings
    ///
    /// # Example
    /// ```no_run
    /// use tenk_data::edgar::{EdgarClient, EdgarClientConfig};
    ///
    /// # fn example() -> tenk_data::Result<()> {
    /// let client = EdgarClient::with_config(EdgarClientConfig {
    ///     user_agent: "Research Desk research@example.com".to_string(),
    ///     ..EdgarClientConfig::default()
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_config(config: EdgarClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DataError::Network)?;

        Ok(Self {
            client,
            endpoints: config.endpoints,
        })
    }

    /// The underlying HTTP client, carrying the configured User-Agent.
    pub const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// The hosts this client queries.
    pub const fn endpoints(&self) -> &EdgarEndpoints {
        &self.endpoints
    }

    /// Get company filings metadata
    ///
    /// # Example
    /// ```no_run
    /// use tenk_data::edgar::EdgarClient;
    ///
    /// # async fn example() -> tenk_data::Result<()> {
    /// let client = EdgarClient::new()?;
    /// let filings = client.get_company_filings(320193).await?;
    /// println!("Has recent filings: {}", filings.recent().is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_company_filings(&self, cik: u64) -> Result<CompanyFilings> {
        let url = self
            .endpoints
            .data_url(&format!("/submissions/CIK{}.json", pad_cik(&cik.to_string())));

        let body = self.get(&url).await?.text().await?;
        CompanyFilings::parse_json(&body)
    }

    /// Fetch the primary document of a filing as the raw response bytes.
    ///
    /// Older filings are often not UTF-8, so the body is never decoded.
    pub async fn get_filing_document(&self, cik: u64, filing: &FilingInfo) -> Result<Vec<u8>> {
        if filing.accession_number.is_empty() {
            return Err(DataError::EdgarApi("Empty accession number".to_string()));
        }
        if filing.primary_document.is_empty() {
            return Err(DataError::EdgarApi("Empty document name".to_string()));
        }

        let url = filing.document_url_at(&self.endpoints.archive_base, cik);
        let content = self
            .get(&url)
            .await?
            .bytes()
            .await
            .map_err(|e| DataError::EdgarApi(format!("Failed to read document content: {}", e)))?;

        Ok(content.to_vec())
    }

    /// Fetch the XBRL company-facts document for a company.
    pub async fn get_company_facts(&self, cik: u64) -> Result<CompanyFacts> {
        let url = self.endpoints.data_url(&format!(
            "/api/xbrl/companyfacts/CIK{}.json",
            pad_cik(&cik.to_string())
        ));

        let body = self.get(&url).await?.text().await?;
        CompanyFacts::parse_json(&body)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "GET {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_endpoints() {
        let endpoints = EdgarEndpoints::default();
        assert_eq!(endpoints.data_base, "https://data.sec.gov");
        assert_eq!(endpoints.archive_base, "https://www.sec.gov");
    }

    #[test]
    fn test_data_url_joins_without_double_slash() {
        let endpoints = EdgarEndpoints::single("http://localhost:8080/");
        assert_eq!(
            endpoints.data_url("/submissions/CIK0000320193.json"),
            "http://localhost:8080/submissions/CIK0000320193.json"
        );
    }

    #[test]
    fn test_default_config() {
        let config = EdgarClientConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
    }

    #[rstest]
    #[case(Some("Research Desk desk@example.com"), "Research Desk desk@example.com")]
    #[case(Some("   "), DEFAULT_USER_AGENT)]
    #[case(Some(""), DEFAULT_USER_AGENT)]
    #[case(None, DEFAULT_USER_AGENT)]
    fn test_user_agent_fallback(#[case] value: Option<&str>, #[case] expected: &str) {
        assert_eq!(user_agent_or_default(value.map(str::to_string)), expected);
    }

    #[test]
    fn test_client_without_timeout() {
        let client = EdgarClient::with_config(EdgarClientConfig {
            timeout: None,
            ..EdgarClientConfig::default()
        });
        assert!(client.is_ok());
    }
}
