#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod company;
pub mod edgar;
pub mod error;
pub mod retriever;

pub use company::Company;
pub use error::{DataError, Result};
pub use retriever::{CompanyReport, FetchConfig, FetchSummary, FilingRetriever};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
