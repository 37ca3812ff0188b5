//! Universe management for tenk.
//!
//! This module resolves the stock universe whose filings are retrieved:
//! the S&P 500 roster and its GICS sector classifications.

pub mod gics;
pub mod sp500;

pub use gics::GicsSector;
pub use sp500::{SP500_URL, SP500Universe};
