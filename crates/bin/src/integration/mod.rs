//! Pipelines behind the CLI subcommands.
//!
//! `fetch_pipeline` resolves the roster and walks it with the filing
//! retriever; `convert_pipeline` checks the renderer and runs the batch
//! converter over the filing tree.

pub(crate) mod convert_pipeline;
pub(crate) mod fetch_pipeline;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Roster resolution failed.
    #[error("Failed to resolve S&P 500 roster: {0}")]
    Universe(#[from] tenk::UniverseError),
    /// EDGAR client setup failed.
    #[error("EDGAR error: {0}")]
    Data(#[from] tenk_data::DataError),
    /// Renderer setup failed.
    #[error("Renderer error: {0}")]
    Convert(#[from] tenk_pdf::ConvertError),
}
