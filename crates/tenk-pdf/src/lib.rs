#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod discover;
pub mod error;
pub mod render;
pub mod stylesheet;

pub use batch::{ConversionSummary, DEFAULT_WORKERS, Outcome, convert_all, convert_one};
pub use discover::{SOURCE_FILE_NAME, discover, pdf_path_for};
pub use error::{ConvertError, Result};
pub use render::{Backend, CommandRenderer, RenderOptions, Renderer};
pub use stylesheet::{Stylesheet, stylesheet_css};
