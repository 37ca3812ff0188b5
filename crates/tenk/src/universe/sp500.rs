//! S&P 500 roster resolved from the Wikipedia constituents table.

use crate::error::{Result, UniverseError};
use crate::universe::gics::GicsSector;
use scraper::{ElementRef, Html, Selector};
use tenk_data::Company;

/// Page listing the current S&P 500 constituents.
pub const SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

const SYMBOL_COLUMN: &str = "Symbol";
const SECURITY_COLUMN: &str = "Security";
const CIK_COLUMN: &str = "CIK";
const SECTOR_COLUMN: &str = "GICS Sector";

/// S&P 500 universe.
#[derive(Debug, Clone, Default)]
pub struct SP500Universe {
    constituents: Vec<Company>,
}

impl SP500Universe {
    /// Build a universe from already resolved companies.
    pub const fn new(constituents: Vec<Company>) -> Self {
        Self { constituents }
    }

    /// Download and parse the constituents page.
    ///
    /// # Errors
    /// Fails when the page is unreachable, answers with a non-success
    /// status, or does not contain a usable constituents table.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(UniverseError::Http(format!(
                "Failed to fetch S&P 500 constituents: HTTP {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        Self::parse(&html)
    }

    /// Parse the constituents table out of the page HTML.
    ///
    /// The table with id `constituents` is preferred; otherwise the first
    /// table on the page is used. Columns are located by header text.
    /// Rows that are too short or carry a non-numeric CIK are skipped.
    pub fn parse(html: &str) -> Result<Self> {
        let doc = Html::parse_document(html);

        let sel_constituents = selector("table#constituents")?;
        let sel_table = selector("table")?;
        let sel_tr = selector("tr")?;
        let sel_th = selector("th")?;
        let sel_td = selector("td")?;

        let table = doc
            .select(&sel_constituents)
            .next()
            .or_else(|| doc.select(&sel_table).next())
            .ok_or(UniverseError::TableNotFound)?;

        let headers: Vec<String> = table
            .select(&sel_tr)
            .map(|tr| tr.select(&sel_th).map(cell_text).collect::<Vec<_>>())
            .find(|row| !row.is_empty())
            .ok_or(UniverseError::TableNotFound)?;

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| UniverseError::MissingColumn(name.to_string()))
        };
        let symbol_idx = column(SYMBOL_COLUMN)?;
        let security_idx = column(SECURITY_COLUMN)?;
        let cik_idx = column(CIK_COLUMN)?;
        let sector_idx = column(SECTOR_COLUMN).ok();

        let mut constituents = Vec::new();
        for (row, tr) in table.select(&sel_tr).enumerate() {
            let cells: Vec<String> = tr.select(&sel_td).map(cell_text).collect();
            if cells.is_empty() {
                continue;
            }

            let (Some(symbol), Some(security), Some(cik)) = (
                cells.get(symbol_idx),
                cells.get(security_idx),
                cells.get(cik_idx),
            ) else {
                tracing::warn!(row, cells = cells.len(), "Skipping short constituents row");
                continue;
            };

            let Ok(cik) = cik.parse::<u64>() else {
                tracing::warn!(row, symbol = %symbol, cik = %cik, "Skipping row with invalid CIK");
                continue;
            };

            let mut company = Company::new(symbol.as_str(), security.as_str(), cik);
            if let Some(sector) = sector_idx.and_then(|idx| cells.get(idx)) {
                company = company.with_sector(sector.as_str());
            }
            constituents.push(company);
        }

        if constituents.is_empty() {
            return Err(UniverseError::Empty);
        }

        Ok(Self::new(constituents))
    }

    /// Get all constituents.
    pub fn constituents(&self) -> &[Company] {
        &self.constituents
    }

    /// Consume the universe, returning its constituents.
    pub fn into_constituents(self) -> Vec<Company> {
        self.constituents
    }

    /// Get all symbols.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.ticker.clone()).collect()
    }

    /// Keep only the given tickers (case-insensitive), in roster order.
    pub fn retain_tickers(self, tickers: &[String]) -> Self {
        let wanted: Vec<String> = tickers.iter().map(|t| t.to_uppercase()).collect();
        for ticker in &wanted {
            if !self
                .constituents
                .iter()
                .any(|c| c.ticker.eq_ignore_ascii_case(ticker))
            {
                tracing::warn!(ticker = %ticker, "Ticker not in S&P 500 roster");
            }
        }

        let constituents = self
            .constituents
            .into_iter()
            .filter(|c| wanted.contains(&c.ticker.to_uppercase()))
            .collect();
        Self::new(constituents)
    }

    /// Keep only constituents of one sector.
    pub fn retain_sector(self, sector: GicsSector) -> Self {
        let constituents = self
            .constituents
            .into_iter()
            .filter(|c| c.sector.as_deref().and_then(GicsSector::from_name) == Some(sector))
            .collect();
        Self::new(constituents)
    }

    /// Keep at most the first `limit` constituents.
    pub fn truncate(mut self, limit: usize) -> Self {
        self.constituents.truncate(limit);
        self
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| UniverseError::Selector(format!("{}: {}", css, e)))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="wikitable"><tr><th>Unrelated</th></tr><tr><td>x</td></tr></table>
        <table class="wikitable sortable" id="constituents">
          <tbody>
            <tr>
              <th>Symbol</th><th>Security</th><th>GICS Sector</th>
              <th>GICS Sub-Industry</th><th>Headquarters Location</th>
              <th>Date added</th><th>CIK</th><th>Founded</th>
            </tr>
            <tr>
              <td><a href="/x">MMM</a></td><td><a href="/3m">3M</a></td><td>Industrials</td>
              <td>Industrial Conglomerates</td><td>Saint Paul, Minnesota</td>
              <td>1957-03-04</td><td>0000066740</td><td>1902</td>
            </tr>
            <tr>
              <td>AAPL</td><td>Apple Inc.</td><td>Information Technology</td>
              <td>Technology Hardware</td><td>Cupertino, California</td>
              <td>1982-11-30</td><td>0000320193</td><td>1977</td>
            </tr>
            <tr>
              <td>BRK.B</td><td>Berkshire
                Hathaway</td><td>Financials</td>
              <td>Multi-Sector Holdings</td><td>Omaha, Nebraska</td>
              <td>2010-02-16</td><td>0001067983</td><td>1839</td>
            </tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_constituents_table() {
        let universe = SP500Universe::parse(PAGE).unwrap();
        let companies = universe.constituents();

        assert_eq!(companies.len(), 3);
        assert_eq!(companies[0], Company::new("MMM", "3M", 66740).with_sector("Industrials"));
        assert_eq!(companies[1].cik, 320193);
        assert_eq!(companies[1].padded_cik(), "0000320193");
        assert_eq!(companies[2].ticker, "BRK.B");
        assert_eq!(companies[2].name, "Berkshire Hathaway");
    }

    #[test]
    fn test_sector_labels_parse() {
        let universe = SP500Universe::parse(PAGE).unwrap();
        let sectors: Vec<Option<GicsSector>> = universe
            .constituents()
            .iter()
            .map(|c| c.sector.as_deref().and_then(GicsSector::from_name))
            .collect();

        assert_eq!(
            sectors,
            vec![
                Some(GicsSector::Industrials),
                Some(GicsSector::InformationTechnology),
                Some(GicsSector::Financials),
            ]
        );
    }

    #[test]
    fn test_first_table_used_without_id() {
        let page = r#"<table>
            <tr><th>Symbol</th><th>Security</th><th>CIK</th></tr>
            <tr><td>XOM</td><td>ExxonMobil</td><td>34088</td></tr>
        </table>"#;
        let universe = SP500Universe::parse(page).unwrap();

        assert_eq!(universe.symbols(), vec!["XOM".to_string()]);
        assert_eq!(universe.constituents()[0].sector, None);
    }

    #[test]
    fn test_missing_table() {
        let result = SP500Universe::parse("<html><body><p>No tables here</p></body></html>");
        assert!(matches!(result, Err(UniverseError::TableNotFound)));
    }

    #[test]
    fn test_missing_cik_column() {
        let page = r#"<table>
            <tr><th>Symbol</th><th>Security</th></tr>
            <tr><td>XOM</td><td>ExxonMobil</td></tr>
        </table>"#;
        let result = SP500Universe::parse(page);
        assert!(matches!(result, Err(UniverseError::MissingColumn(ref c)) if c == "CIK"));
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let page = r#"<table>
            <tr><th>Symbol</th><th>Security</th><th>CIK</th></tr>
            <tr><td>BAD</td><td>Bad Row</td><td>n/a</td></tr>
            <tr><td>SHORT</td></tr>
            <tr><td>XOM</td><td>ExxonMobil</td><td>34088</td></tr>
        </table>"#;
        let universe = SP500Universe::parse(page).unwrap();
        assert_eq!(universe.symbols(), vec!["XOM".to_string()]);
    }

    #[test]
    fn test_table_without_rows() {
        let page = r#"<table><tr><th>Symbol</th><th>Security</th><th>CIK</th></tr></table>"#;
        assert!(matches!(SP500Universe::parse(page), Err(UniverseError::Empty)));
    }

    #[test]
    fn test_retain_tickers() {
        let universe = SP500Universe::parse(PAGE)
            .unwrap()
            .retain_tickers(&["aapl".to_string(), "brk.b".to_string(), "NOPE".to_string()]);
        assert_eq!(universe.symbols(), vec!["AAPL".to_string(), "BRK.B".to_string()]);
    }

    #[test]
    fn test_retain_sector() {
        let universe = SP500Universe::parse(PAGE)
            .unwrap()
            .retain_sector(GicsSector::Financials);
        assert_eq!(universe.symbols(), vec!["BRK.B".to_string()]);
        assert_eq!(universe.constituents()[0].sector.as_deref(), Some("Financials"));
    }

    #[test]
    fn test_truncate() {
        let universe = SP500Universe::parse(PAGE).unwrap().truncate(2);
        assert_eq!(universe.symbols(), vec!["MMM".to_string(), "AAPL".to_string()]);
        assert_eq!(universe.constituents().len(), 2);
    }
}
