//! Merge: concatenate the pages of several PDFs, source by source.

use std::time::Instant;

use tracing::info;

use crate::config::WriteOptions;
use crate::document::{OutputDocument, PdfSource};
use crate::error::{Result, SpliceError};
use crate::ops::{OperationOutput, OperationStatistics};

/// Merge `sources` into one PDF with default write options.
///
/// The output holds every page of every source: all of the first source's
/// pages in their natural order, then all of the second's, and so on.
///
/// # Errors
///
/// - [`SpliceError::NoInputSources`] if `sources` is empty
/// - [`SpliceError::MalformedSource`] for the first source that cannot be
///   parsed; no output is produced in that case
///
/// # Examples
///
/// ```no_run
/// # use pdfsplice::document::PdfSource;
/// # fn example(a: Vec<u8>, b: Vec<u8>) -> pdfsplice::Result<()> {
/// let sources = vec![PdfSource::new("a.pdf", a), PdfSource::new("b.pdf", b)];
/// let merged = pdfsplice::ops::merge(&sources)?;
/// std::fs::write("merged_document.pdf", merged)?;
/// # Ok(())
/// # }
/// ```
pub fn merge(sources: &[PdfSource]) -> Result<Vec<u8>> {
    Merger::new()
        .merge(sources)
        .map(|merged| merged.bytes)
}

/// PDF merger with configurable write options.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: WriteOptions,
}

impl Merger {
    /// Create a merger with default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger that serializes with `options`.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Merge `sources` in order and report statistics alongside the bytes.
    pub fn merge(&self, sources: &[PdfSource]) -> Result<OperationOutput> {
        if sources.is_empty() {
            return Err(SpliceError::NoInputSources);
        }

        let start = Instant::now();
        let total = sources.len();
        let mut output = OutputDocument::new();

        for (position, source) in sources.iter().enumerate() {
            let document = source.open().map_err(|err| match err {
                SpliceError::MalformedSource { name, reason } => SpliceError::MalformedSource {
                    name,
                    reason: format!("input {} of {total}: {reason}", position + 1),
                },
                other => other,
            })?;

            let mut importer = output.importer(&document);
            for page in document.pages() {
                importer.append_page(page)?;
            }
        }

        let pages = output.page_count();
        let bytes = output.serialize(&self.options)?;

        let statistics = OperationStatistics {
            sources: total,
            input_size: sources.iter().map(|s| s.len() as u64).sum(),
            pages,
            output_size: bytes.len() as u64,
            elapsed: start.elapsed(),
        };

        info!(
            sources = statistics.sources,
            pages = statistics.pages,
            bytes = statistics.output_size,
            "merged documents"
        );

        Ok(OperationOutput { bytes, statistics })
    }
}
