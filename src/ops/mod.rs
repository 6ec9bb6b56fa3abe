//! The two page operations: merge and extract.
//!
//! Both take already-read [`PdfSource`](crate::document::PdfSource) values
//! and return one serialized PDF. They never touch the filesystem and hold
//! no state between calls.

pub mod extract;
pub mod merge;

pub use extract::{Extractor, PageSelection, extract, parse_page_token};
pub use merge::{Merger, merge};

use std::time::Duration;

use crate::io::format_file_size;

/// Statistics about one finished operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationStatistics {
    /// Number of source documents read.
    pub sources: usize,

    /// Total size of the sources in bytes.
    pub input_size: u64,

    /// Number of pages in the output.
    pub pages: usize,

    /// Size of the serialized output in bytes.
    pub output_size: u64,

    /// Wall time spent assembling and serializing.
    pub elapsed: Duration,
}

impl OperationStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// A serialized output document together with its statistics.
#[derive(Debug, Clone)]
pub struct OperationOutput {
    /// The complete PDF file image.
    pub bytes: Vec<u8>,

    /// Statistics about the operation.
    pub statistics: OperationStatistics,
}
