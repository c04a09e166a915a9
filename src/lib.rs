//! Read DOCX containers into a structured document model.
//!
//! The pipeline resolves the `basedOn` style inheritance graph, composes
//! resolved styles with direct paragraph- and run-level formatting, and
//! coalesces stylistically identical adjacent runs. The result is a
//! [`Document`] of paragraphs, runs, footnotes and endnotes, plus the raw
//! style map.
//!
//! [`read_document`] and [`read_document_from_memory`] are total: any
//! failure to open or parse the container yields an empty [`Document`].
//! The `try_` variants expose the hard errors (unreadable file, not a ZIP
//! archive) for callers that need to tell those apart.

mod docx;
mod error;
mod model;

pub use error::Error;
pub use model::{
    Color, Document, Justification, Note, Paragraph, Run, StyleDef, StyleKind, TabAlignment,
    TabStop,
};

use std::path::Path;
use std::time::Instant;

/// Read a DOCX file at `path`. Returns an empty document if the file
/// cannot be read or is not a ZIP archive.
pub fn read_document(path: &Path) -> Document {
    try_read_document(path).unwrap_or_else(|e| {
        log::warn!("{}: {e}; returning empty document", path.display());
        Document::default()
    })
}

/// Read a DOCX container from a byte slice. Returns an empty document if
/// the bytes are not a ZIP archive.
pub fn read_document_from_memory(bytes: &[u8]) -> Document {
    try_read_document_from_memory(bytes).unwrap_or_else(|e| {
        log::warn!("{e}; returning empty document");
        Document::default()
    })
}

/// Fallible variant of [`read_document`].
pub fn try_read_document(path: &Path) -> Result<Document, Error> {
    let t0 = Instant::now();
    let doc = docx::parse(path)?;
    log::debug!(
        "read {} in {:.1}ms",
        path.display(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(doc)
}

/// Fallible variant of [`read_document_from_memory`].
pub fn try_read_document_from_memory(bytes: &[u8]) -> Result<Document, Error> {
    docx::parse_bytes(bytes)
}
