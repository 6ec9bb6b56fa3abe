//! PDF page model.
//!
//! A thin layer over lopdf that offers exactly what the two workflows need:
//! read the pages of a source, append copies of pages to a new document,
//! serialize the new document once.

mod output;
mod source;

pub use output::{OutputDocument, PageImporter};
pub use source::{Page, PdfSource, SourceDocument};
