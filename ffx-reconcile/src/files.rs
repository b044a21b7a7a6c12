//! Reading source documents and writing the merged document

use crate::models::{MergedDocument, SourceDocument};
use ffx_common::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A source document together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub document: SourceDocument,
}

/// Load source documents in the given order
///
/// Paths that do not exist are skipped with a warning. Unreadable files and
/// invalid JSON are errors.
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<LoadedSource>> {
    let mut loaded = Vec::with_capacity(paths.len());

    for path in paths {
        if !path.exists() {
            warn!("Source file not found, skipping: {}", path.display());
            continue;
        }

        let content = std::fs::read_to_string(path)?;
        let document: SourceDocument = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} timestamps from {}",
            document.timestamps.len(),
            path.display()
        );
        loaded.push(LoadedSource {
            path: path.clone(),
            document,
        });
    }

    Ok(loaded)
}

/// Render a merged document as pretty-printed JSON
pub fn render_document(document: &MergedDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write a merged document to `output`
pub fn write_document(document: &MergedDocument, output: &Path) -> Result<()> {
    let mut json = render_document(document)?;
    json.push('\n');
    std::fs::write(output, json)?;
    Ok(())
}
