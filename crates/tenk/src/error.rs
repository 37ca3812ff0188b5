//! Error types for roster resolution.

use thiserror::Error;

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, UniverseError>;

/// Errors that can occur while resolving the index roster.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// The page has no constituents table
    #[error("Constituents table not found")]
    TableNotFound,

    /// A required column is missing from the table header
    #[error("Column not found in constituents table: {0}")]
    MissingColumn(String),

    /// The table parsed but produced no companies
    #[error("Constituents table has no usable rows")]
    Empty,

    /// Invalid CSS selector
    #[error("Invalid selector: {0}")]
    Selector(String),
}
