//! Locating filing documents on disk.

use std::path::{Path, PathBuf};

/// Name of the document the converter looks for.
pub const SOURCE_FILE_NAME: &str = "filing.html";

/// Extension of the rendered output.
pub const PDF_EXTENSION: &str = "pdf";

/// Collect every file under `root` named exactly `file_name`, sorted by path.
///
/// Symlinks are not followed. A missing root yields an empty list; entries
/// that cannot be read are logged and skipped.
pub fn discover(root: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                // depth 0 is the root itself
                if e.depth() > 0 {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                }
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name() == file_name)
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    files
}

/// Output path for a document: the same path with a `.pdf` extension.
pub fn pdf_path_for(html: &Path) -> PathBuf {
    html.with_extension(PDF_EXTENSION)
}
