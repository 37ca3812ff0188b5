//! Company records resolved from an index roster.

use crate::edgar::filings::pad_cik;
use serde::{Deserialize, Serialize};

/// A company whose filings can be retrieved from EDGAR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol as listed in the roster (e.g. "AAPL", "BRK.B").
    pub ticker: String,
    /// Display name.
    pub name: String,
    /// SEC Central Index Key.
    pub cik: u64,
    /// Sector label from the roster, when it carries one.
    pub sector: Option<String>,
}

impl Company {
    /// Create a company without a sector label.
    pub fn new(ticker: impl Into<String>, name: impl Into<String>, cik: u64) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            cik,
            sector: None,
        }
    }

    /// Attach a sector label.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// CIK zero-padded to the 10 digits used by `data.sec.gov` URLs.
    pub fn padded_cik(&self) -> String {
        pad_cik(&self.cik.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_cik() {
        let apple = Company::new("AAPL", "Apple Inc.", 320193);
        assert_eq!(apple.padded_cik(), "0000320193");
    }

    #[test]
    fn test_with_sector() {
        let xom = Company::new("XOM", "ExxonMobil", 34088).with_sector("Energy");
        assert_eq!(xom.sector.as_deref(), Some("Energy"));
    }
}
