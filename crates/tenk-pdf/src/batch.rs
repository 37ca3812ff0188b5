//! Batch conversion over a bounded pool of workers.

use crate::discover::pdf_path_for;
use crate::render::Renderer;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Default number of concurrent conversions.
pub const DEFAULT_WORKERS: usize = 4;

/// Result of converting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new PDF was written.
    Converted,
    /// The PDF already existed; the renderer was not invoked.
    Skipped,
    /// The renderer failed; the error was logged.
    Failed,
}

impl Outcome {
    /// Whether a new PDF was produced.
    pub const fn converted(&self) -> bool {
        matches!(self, Self::Converted)
    }
}

/// Totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Documents handed to the batch.
    pub found: usize,
    /// PDFs written.
    pub converted: usize,
    /// Documents that already had a PDF.
    pub skipped: usize,
    /// Documents the renderer failed on.
    pub failed: usize,
}

impl ConversionSummary {
    /// Count one outcome.
    pub const fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Convert one document next to itself (`filing.html` -> `filing.pdf`).
///
/// An existing PDF is left alone and counts as skipped. Renderer errors are
/// logged and reported as [`Outcome::Failed`]; a partial PDF left behind by a
/// failed render is removed so the next run retries the document.
pub async fn convert_one<R: Renderer>(renderer: &R, html: &Path) -> Outcome {
    let pdf = pdf_path_for(html);
    if pdf.exists() {
        tracing::debug!(path = %pdf.display(), "PDF already exists");
        return Outcome::Skipped;
    }

    match renderer.render(html, &pdf).await {
        Ok(()) => {
            tracing::info!(path = %html.display(), "Successfully converted");
            Outcome::Converted
        }
        Err(e) => {
            tracing::error!(
                path = %html.display(),
                renderer = renderer.name(),
                error = %e,
                "Error processing"
            );
            if pdf.exists()
                && let Err(e) = tokio::fs::remove_file(&pdf).await
            {
                tracing::warn!(path = %pdf.display(), error = %e, "Failed to remove partial PDF");
            }
            Outcome::Failed
        }
    }
}

/// Convert every document with at most `workers` renders in flight.
///
/// Each finished document advances `progress` by one. All outcomes are
/// collected before returning.
pub async fn convert_all<R: Renderer>(
    renderer: &R,
    files: &[PathBuf],
    workers: usize,
    progress: Option<&ProgressBar>,
) -> ConversionSummary {
    let mut summary = ConversionSummary {
        found: files.len(),
        ..ConversionSummary::default()
    };

    let outcomes: Vec<Outcome> = stream::iter(files)
        .map(|html| convert_one(renderer, html))
        .buffer_unordered(workers.max(1))
        .inspect(|_| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    for outcome in outcomes {
        summary.record(outcome);
    }

    summary
}
