//! Batch PDF conversion of the filing tree.

use super::PipelineError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tenk_pdf::{
    Backend, CommandRenderer, ConversionSummary, RenderOptions, SOURCE_FILE_NAME, Stylesheet,
    convert_all, discover, stylesheet_css,
};

/// Everything `tenk convert` needs.
#[derive(Debug, Clone)]
pub(crate) struct ConvertSettings {
    /// Root of the filing tree.
    pub(crate) data_dir: PathBuf,
    /// Renderer to invoke.
    pub(crate) backend: Backend,
    /// Explicit renderer path instead of a `PATH` lookup.
    pub(crate) program: Option<PathBuf>,
    /// Concurrent conversions.
    pub(crate) workers: usize,
    /// Page layout.
    pub(crate) options: RenderOptions,
}

/// Check the renderer, then convert every `filing.html` lacking a PDF.
///
/// A missing renderer aborts the run before any file is touched.
pub(crate) async fn run_convert(settings: ConvertSettings) -> Result<ConversionSummary, PipelineError> {
    let stylesheet = Stylesheet::write(&stylesheet_css(&settings.options))?;
    let options = RenderOptions {
        stylesheet: Some(stylesheet.path().to_path_buf()),
        ..settings.options
    };

    let mut renderer = CommandRenderer::new(settings.backend).with_options(options);
    if let Some(program) = settings.program {
        renderer = renderer.with_program(program);
    }

    let version = renderer.check_available().await?;
    tracing::info!(renderer = %settings.backend, version = %version, "Renderer available");

    let files = discover(&settings.data_dir, SOURCE_FILE_NAME);
    tracing::info!(
        root = %settings.data_dir.display(),
        "Found {} HTML files to convert",
        files.len()
    );

    let pb = progress_bar(files.len() as u64);
    let summary = convert_all(&renderer, &files, settings.workers, Some(&pb)).await;
    pb.finish_with_message(format!(
        "{} converted, {} skipped, {} failed",
        summary.converted, summary.skipped, summary.failed
    ));

    // The stylesheet must outlive every render.
    drop(stylesheet);
    Ok(summary)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Converting to PDF");
    pb
}
