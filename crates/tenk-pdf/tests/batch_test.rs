//! Integration tests for batch conversion with a scripted renderer.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tenk_pdf::{
    ConversionSummary, ConvertError, Outcome, Renderer, SOURCE_FILE_NAME, convert_all,
    convert_one, discover,
};
use tempfile::TempDir;

/// Writes a stub PDF, except for documents under a `BROKEN` directory where
/// it leaves a truncated file and fails.
#[derive(Debug, Default)]
struct ScriptedRenderer {
    calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedRenderer {
    fn calls(&self) -> Vec<PathBuf> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

impl Renderer for ScriptedRenderer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn render(&self, html: &Path, pdf: &Path) -> tenk_pdf::Result<()> {
        self.calls.lock().unwrap().push(html.to_path_buf());
        if html.to_string_lossy().contains("BROKEN") {
            std::fs::write(pdf, b"%PDF-1.4 trunc")?;
            return Err(ConvertError::RendererFailed {
                program: PathBuf::from("scripted"),
                status: "exit status: 1".to_string(),
                stderr: "layout error".to_string(),
            });
        }
        std::fs::write(pdf, b"%PDF-1.4")?;
        Ok(())
    }
}

fn filing(root: &Path, ticker: &str, date: &str) -> PathBuf {
    let dir = root.join(ticker).join(format!("10K_{date}"));
    std::fs::create_dir_all(&dir).unwrap();
    let html = dir.join(SOURCE_FILE_NAME);
    std::fs::write(&html, "<html><body>10-K</body></html>").unwrap();
    html
}

#[tokio::test]
async fn test_convert_one_writes_pdf() {
    let root = TempDir::new().unwrap();
    let html = filing(root.path(), "AAPL", "2024-11-01");
    let renderer = ScriptedRenderer::default();

    let outcome = convert_one(&renderer, &html).await;

    assert_eq!(outcome, Outcome::Converted);
    assert!(outcome.converted());
    assert!(html.with_extension("pdf").exists());
}

#[tokio::test]
async fn test_existing_pdf_is_skipped_without_rendering() {
    let root = TempDir::new().unwrap();
    let html = filing(root.path(), "AAPL", "2024-11-01");
    std::fs::write(html.with_extension("pdf"), b"already here").unwrap();
    let renderer = ScriptedRenderer::default();

    let outcome = convert_one(&renderer, &html).await;

    assert_eq!(outcome, Outcome::Skipped);
    assert!(!outcome.converted());
    assert!(renderer.calls().is_empty());
    assert_eq!(
        std::fs::read(html.with_extension("pdf")).unwrap(),
        b"already here"
    );
}

#[tokio::test]
async fn test_failure_does_not_stop_the_batch() {
    let root = TempDir::new().unwrap();
    let good_a = filing(root.path(), "AAPL", "2024-11-01");
    let broken = filing(root.path(), "BROKEN", "2024-02-01");
    let good_m = filing(root.path(), "MSFT", "2024-07-30");
    let done = filing(root.path(), "XOM", "2024-02-28");
    std::fs::write(done.with_extension("pdf"), b"%PDF-1.4").unwrap();

    let files = discover(root.path(), SOURCE_FILE_NAME);
    assert_eq!(files.len(), 4);

    let renderer = ScriptedRenderer::default();
    let summary = convert_all(&renderer, &files, 4, None).await;

    assert_eq!(
        summary,
        ConversionSummary {
            found: 4,
            converted: 2,
            skipped: 1,
            failed: 1,
        }
    );

    let mut expected = vec![good_a.clone(), broken.clone(), good_m.clone()];
    expected.sort();
    assert_eq!(renderer.calls(), expected);

    assert!(good_a.with_extension("pdf").exists());
    assert!(good_m.with_extension("pdf").exists());
    // The truncated output of the failed render is not left behind
    assert!(!broken.with_extension("pdf").exists());
}

#[tokio::test]
async fn test_rerun_converts_nothing_new() {
    let root = TempDir::new().unwrap();
    filing(root.path(), "AAPL", "2024-11-01");
    filing(root.path(), "MSFT", "2024-07-30");
    let files = discover(root.path(), SOURCE_FILE_NAME);

    let first = convert_all(&ScriptedRenderer::default(), &files, 4, None).await;
    assert_eq!(first.converted, 2);

    let renderer = ScriptedRenderer::default();
    let second = convert_all(&renderer, &files, 4, None).await;
    assert_eq!(second.converted, 0);
    assert_eq!(second.skipped, 2);
    assert!(renderer.calls().is_empty());
}

#[tokio::test]
async fn test_zero_workers_still_progresses() {
    let root = TempDir::new().unwrap();
    filing(root.path(), "AAPL", "2024-11-01");
    let files = discover(root.path(), SOURCE_FILE_NAME);

    let progress = indicatif::ProgressBar::hidden();
    progress.set_length(files.len() as u64);
    let summary = convert_all(&ScriptedRenderer::default(), &files, 0, Some(&progress)).await;

    assert_eq!(summary.converted, 1);
    assert_eq!(progress.position(), 1);
}
