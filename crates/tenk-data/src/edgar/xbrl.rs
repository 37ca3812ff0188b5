//! XBRL company facts from SEC EDGAR.
//!
//! The SEC provides XBRL data in JSON format at:
//! `https://data.sec.gov/api/xbrl/companyfacts/CIK{cik_padded}.json`
//!
//! Facts are kept as the raw JSON tree. Nothing here interprets individual
//! concepts; the document is stored next to the filing it was fetched for.

use crate::error::{DataError, Result};
use serde_json::Value;

/// A company-facts document as returned by the SEC API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFacts {
    raw: Value,
}

impl CompanyFacts {
    /// Wrap an already decoded JSON value.
    pub const fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Parses a company-facts document from SEC JSON API format.
    pub fn parse_json(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse SEC JSON: {}", e)))?;
        Ok(Self { raw })
    }

    /// The underlying JSON tree.
    pub const fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Entity name reported by the filer.
    pub fn entity_name(&self) -> Option<&str> {
        self.raw.get("entityName").and_then(Value::as_str)
    }

    /// Number of concepts across all taxonomies (us-gaap, dei, ...).
    pub fn concept_count(&self) -> usize {
        self.raw
            .get("facts")
            .and_then(Value::as_object)
            .map(|taxonomies| {
                taxonomies
                    .values()
                    .filter_map(Value::as_object)
                    .map(|concepts| concepts.len())
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Render as JSON indented by two spaces, keys in document order.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.raw)?)
    }
}
