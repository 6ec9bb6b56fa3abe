//! Filesystem I/O around the page operations.
//!
//! The operations themselves work on in-memory buffers; this module reads
//! input files into [`PdfSource`](crate::document::PdfSource) values and
//! writes finished buffers back to disk.

pub mod reader;
pub mod writer;

pub use reader::{SourceReader, check_path_exists, expand_patterns};
pub use writer::{BufferWriter, WriteStatistics, format_file_size};
