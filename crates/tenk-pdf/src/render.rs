//! HTML-to-PDF renderers.
//!
//! Rendering is delegated to a command-line program. Two backends are
//! supported:
//! - `wkhtmltopdf`: page size, margins and the page-number footer are passed
//!   as flags; the stylesheet is applied with `--user-style-sheet`.
//! - `weasyprint`: everything, including the footer, comes from the
//!   stylesheet (see [`stylesheet_css`](crate::stylesheet::stylesheet_css)).

use crate::error::{ConvertError, Result};
use std::ffi::OsString;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use tokio::process::Command;

/// Renders one HTML document to a PDF file.
pub trait Renderer: Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Render `html` into `pdf`.
    fn render(&self, html: &Path, pdf: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Supported command-line renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// wkhtmltopdf (Qt WebKit)
    Wkhtmltopdf,

    /// WeasyPrint
    #[default]
    Weasyprint,
}

impl Backend {
    /// Returns all backends.
    pub const fn all() -> [Self; 2] {
        [Self::Wkhtmltopdf, Self::Weasyprint]
    }

    /// Program name looked up on `PATH`.
    pub const fn program(&self) -> &'static str {
        match self {
            Self::Wkhtmltopdf => "wkhtmltopdf",
            Self::Weasyprint => "weasyprint",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for Backend {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|b| b.program().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConvertError::UnknownRenderer(s.to_string()))
    }
}

/// Page and output options shared by the backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paper size name understood by the renderer (e.g. "A4", "Letter").
    pub page_size: String,
    /// Margin on every side, in millimetres.
    pub margin_mm: u32,
    /// Print "Page N of M" in the bottom-right corner.
    pub page_numbers: bool,
    /// Let the document load local files (images, stylesheets).
    pub local_file_access: bool,
    /// Extra stylesheet applied to every document.
    pub stylesheet: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            margin_mm: 10,
            page_numbers: true,
            local_file_access: true,
            stylesheet: None,
        }
    }
}

/// A renderer that shells out to `wkhtmltopdf` or `weasyprint`.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    backend: Backend,
    program: PathBuf,
    options: RenderOptions,
}

impl CommandRenderer {
    /// Renderer for `backend`, found on `PATH`, with default options.
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            program: PathBuf::from(backend.program()),
            options: RenderOptions::default(),
        }
    }

    /// Use an explicit program path.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The backend in use.
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// The render options in use.
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Command-line arguments for rendering `html` into `pdf`.
    pub fn args(&self, html: &Path, pdf: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        let opts = &self.options;

        match self.backend {
            Backend::Wkhtmltopdf => {
                let margin = format!("{}mm", opts.margin_mm);
                args.push("--quiet".into());
                args.push("--encoding".into());
                args.push("utf-8".into());
                args.push("--page-size".into());
                args.push(opts.page_size.clone().into());
                for side in ["--margin-top", "--margin-bottom", "--margin-left", "--margin-right"] {
                    args.push(side.into());
                    args.push(margin.clone().into());
                }
                if opts.page_numbers {
                    args.push("--footer-right".into());
                    args.push("Page [page] of [topage]".into());
                    args.push("--footer-font-size".into());
                    args.push("8".into());
                }
                if opts.local_file_access {
                    args.push("--enable-local-file-access".into());
                }
                if let Some(css) = &opts.stylesheet {
                    args.push("--user-style-sheet".into());
                    args.push(css.clone().into());
                }
            }
            Backend::Weasyprint => {
                args.push("--presentational-hints".into());
                if let Some(css) = &opts.stylesheet {
                    args.push("--stylesheet".into());
                    args.push(css.clone().into());
                }
            }
        }

        args.push(html.into());
        args.push(pdf.into());
        args
    }

    /// Check the renderer can be started, returning its version line.
    ///
    /// # Errors
    /// Fails when the program is missing or `--version` exits unsuccessfully.
    pub async fn check_available(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(self.failure(&output));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        Ok(version.lines().next().unwrap_or_default().trim().to_string())
    }

    fn failure(&self, output: &std::process::Output) -> ConvertError {
        ConvertError::RendererFailed {
            program: self.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl Renderer for CommandRenderer {
    fn name(&self) -> &str {
        self.backend.program()
    }

    async fn render(&self, html: &Path, pdf: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .args(self.args(html, pdf))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(self.failure(&output));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[rstest]
    #[case("wkhtmltopdf", Backend::Wkhtmltopdf)]
    #[case("WeasyPrint", Backend::Weasyprint)]
    fn test_backend_from_str(#[case] name: &str, #[case] expected: Backend) {
        assert_eq!(name.parse::<Backend>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_backend() {
        assert!(matches!(
            "prince".parse::<Backend>(),
            Err(ConvertError::UnknownRenderer(_))
        ));
    }

    #[test]
    fn test_wkhtmltopdf_args() {
        let renderer = CommandRenderer::new(Backend::Wkhtmltopdf).with_options(RenderOptions {
            stylesheet: Some(PathBuf::from("/tmp/filing.css")),
            ..RenderOptions::default()
        });
        let args = strings(renderer.args(Path::new("in/filing.html"), Path::new("in/filing.pdf")));

        assert_eq!(
            args,
            vec![
                "--quiet",
                "--encoding",
                "utf-8",
                "--page-size",
                "A4",
                "--margin-top",
                "10mm",
                "--margin-bottom",
                "10mm",
                "--margin-left",
                "10mm",
                "--margin-right",
                "10mm",
                "--footer-right",
                "Page [page] of [topage]",
                "--footer-font-size",
                "8",
                "--enable-local-file-access",
                "--user-style-sheet",
                "/tmp/filing.css",
                "in/filing.html",
                "in/filing.pdf",
            ]
        );
    }

    #[test]
    fn test_wkhtmltopdf_args_without_footer_or_local_access() {
        let renderer = CommandRenderer::new(Backend::Wkhtmltopdf).with_options(RenderOptions {
            page_numbers: false,
            local_file_access: false,
            ..RenderOptions::default()
        });
        let args = strings(renderer.args(Path::new("a.html"), Path::new("a.pdf")));

        assert!(!args.iter().any(|a| a.starts_with("--footer")));
        assert!(!args.contains(&"--enable-local-file-access".to_string()));
        assert_eq!(&args[args.len() - 2..], ["a.html", "a.pdf"]);
    }

    #[test]
    fn test_weasyprint_args() {
        let renderer = CommandRenderer::new(Backend::Weasyprint).with_options(RenderOptions {
            stylesheet: Some(PathBuf::from("/tmp/filing.css")),
            ..RenderOptions::default()
        });
        let args = strings(renderer.args(Path::new("a.html"), Path::new("a.pdf")));

        assert_eq!(
            args,
            vec![
                "--presentational-hints",
                "--stylesheet",
                "/tmp/filing.css",
                "a.html",
                "a.pdf"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let renderer = CommandRenderer::new(Backend::Wkhtmltopdf)
            .with_program("/nonexistent/tenk-renderer-binary");
        let result = renderer.check_available().await;
        assert!(matches!(result, Err(ConvertError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_render_failure() {
        let renderer = CommandRenderer::new(Backend::Wkhtmltopdf).with_program("false");
        let result = renderer
            .render(Path::new("a.html"), Path::new("a.pdf"))
            .await;
        assert!(matches!(result, Err(ConvertError::RendererFailed { .. })));
    }
}
