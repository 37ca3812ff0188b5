//! Print stylesheet applied to every rendered filing.

use crate::error::Result;
use crate::render::RenderOptions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const BODY_CSS: &str = r#"
body {
    font-family: Arial, sans-serif;
    font-size: 10pt;
    line-height: 1.3;
}
table {
    border-collapse: collapse;
    width: 100%;
    margin: 10px 0;
}
td, th {
    border: 1px solid #ddd;
    padding: 8px;
}
th {
    background-color: #f8f8f8;
}
pre {
    white-space: pre-wrap;
    font-size: 9pt;
}
"#;

/// CSS for the given options: the `@page` rule (size, margins, footer)
/// followed by the typography and table rules.
pub fn stylesheet_css(options: &RenderOptions) -> String {
    let footer = if options.page_numbers {
        r#"
    @bottom-right {
        content: "Page " counter(page) " of " counter(pages);
        font-size: 8pt;
    }"#
    } else {
        ""
    };

    format!(
        "@page {{\n    size: {};\n    margin: {}mm;{}\n}}\n{}",
        options.page_size,
        options.margin_mm,
        footer,
        BODY_CSS.trim_start()
    )
}

/// A stylesheet written to a temporary file, removed on drop.
#[derive(Debug)]
pub struct Stylesheet {
    file: NamedTempFile,
}

impl Stylesheet {
    /// Write `css` to a fresh temporary `.css` file.
    pub fn write(css: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("tenk-")
            .suffix(".css")
            .tempfile()?;
        file.write_all(css.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Location of the stylesheet.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
