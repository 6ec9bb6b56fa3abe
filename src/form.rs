//! The two-tab form workflow as plain function calls.
//!
//! A form front end collects uploads, an output name and (for extraction) a
//! comma-separated page list, then hands them to this module. Messages meant
//! for the person filling in the form go through a [`Notifier`]; the
//! finished file comes back as a [`Download`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::document::PdfSource;
//! use pdfsplice::form::{ExtractRequest, Notifier};
//! use pdfsplice::output::OutputFormatter;
//!
//! # fn example(bytes: Vec<u8>) -> pdfsplice::Result<()> {
//! let request = ExtractRequest::new(
//!     Some(PdfSource::new("report.pdf", bytes)),
//!     "selected_pages.pdf",
//!     "1,3,5",
//! );
//!
//! if let Some(download) = request.run(&OutputFormatter::default())? {
//!     std::fs::write(&download.file_name, &download.bytes)?;
//! }
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::config::{DEFAULT_EXTRACTED_NAME, DEFAULT_MERGED_NAME, WriteOptions};
use crate::document::PdfSource;
use crate::error::{Result, SpliceError};
use crate::ops::{Extractor, Merger, OperationStatistics};
use crate::output::OutputFormatter;

/// MIME type the finished document is offered with.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Shown when the merge form is submitted without files or an output name.
pub const MERGE_INPUT_MESSAGE: &str =
    "Please upload some PDF files and specify a name for the merged file.";

/// Shown when the extract form is submitted with a field left empty.
pub const EXTRACT_INPUT_MESSAGE: &str =
    "Please upload a PDF file, specify the new PDF file name, and enter the pages to extract.";

/// Shown after a successful merge.
pub const MERGE_SUCCESS_MESSAGE: &str = "PDFs merged successfully!";

/// Shown after a successful extraction.
pub const EXTRACT_SUCCESS_MESSAGE: &str = "Pages extracted successfully!";

/// Receives the messages a form shows to its user.
pub trait Notifier {
    /// The request was incomplete or could not be carried out.
    fn error(&self, message: &str);

    /// The request succeeded.
    fn success(&self, message: &str);
}

impl Notifier for OutputFormatter {
    fn error(&self, message: &str) {
        OutputFormatter::error(self, message);
    }

    fn success(&self, message: &str) {
        OutputFormatter::success(self, message);
    }
}

/// A finished document, ready to be offered for download.
#[derive(Debug, Clone)]
pub struct Download {
    /// Name the user asked the file to be saved under.
    pub file_name: String,

    /// Always [`PDF_MIME_TYPE`].
    pub mime_type: &'static str,

    /// The complete PDF file image.
    pub bytes: Vec<u8>,

    /// Statistics about the operation that produced it.
    pub statistics: OperationStatistics,
}

/// Split the raw page-list entry on commas.
///
/// Entries are not trimmed here; whitespace around a number is ignored when
/// the number is parsed. An empty entry (for example from `"1,,2"` or a
/// trailing comma) is kept and later rejected as non-numeric.
pub fn split_page_list(text: &str) -> Vec<String> {
    text.split(',').map(str::to_string).collect()
}

/// Merge uploaded PDFs, in upload order.
pub fn merge_pdfs(sources: &[PdfSource]) -> Result<Vec<u8>> {
    crate::ops::merge(sources)
}

/// Extract the pages named by `raw_tokens` from `source`.
///
/// Page-list problems are shown through `notifier` and yield `Ok(None)`;
/// only a source that cannot be parsed is returned as an error.
/// `output_name` is the name the result will be offered under; it does not
/// affect the document.
pub fn save_selected_pages<S: AsRef<str>>(
    source: &PdfSource,
    output_name: &str,
    raw_tokens: &[S],
    notifier: &dyn Notifier,
) -> Result<Option<Vec<u8>>> {
    debug!(source = source.name(), output_name, "extracting selected pages");

    match crate::ops::extract(source, raw_tokens) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.is_page_selection_error() => {
            notifier.error(&err.user_message());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Everything the merge tab collects.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Uploaded files, in upload order.
    pub files: Vec<PdfSource>,

    /// Name for the merged file.
    pub output_name: String,

    /// Serialization options.
    pub options: WriteOptions,
}

impl MergeRequest {
    /// Create a request with default write options.
    pub fn new(files: Vec<PdfSource>, output_name: impl Into<String>) -> Self {
        Self {
            files,
            output_name: output_name.into(),
            options: WriteOptions::default(),
        }
    }

    /// Create a request using the default output name.
    pub fn with_default_name(files: Vec<PdfSource>) -> Self {
        Self::new(files, DEFAULT_MERGED_NAME)
    }

    /// Check that files and an output name were provided.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() || self.output_name.is_empty() {
            return Err(SpliceError::missing_form_input(MERGE_INPUT_MESSAGE));
        }
        Ok(())
    }

    /// Validate and merge, returning every failure as an error.
    pub fn submit(&self) -> Result<Download> {
        self.validate()?;

        let merged = Merger::with_options(self.options).merge(&self.files)?;
        Ok(Download {
            file_name: self.output_name.clone(),
            mime_type: PDF_MIME_TYPE,
            bytes: merged.bytes,
            statistics: merged.statistics,
        })
    }

    /// Submit the form, reporting to `notifier` the way the merge tab does.
    ///
    /// Missing inputs are reported as an error and yield `Ok(None)`. A file
    /// that cannot be parsed is returned as an error.
    pub fn run(&self, notifier: &dyn Notifier) -> Result<Option<Download>> {
        match self.submit() {
            Ok(download) => {
                notifier.success(MERGE_SUCCESS_MESSAGE);
                Ok(Some(download))
            }
            Err(err @ SpliceError::MissingFormInput { .. }) => {
                notifier.error(&err.user_message());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Everything the extract tab collects.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    /// The uploaded file, if any.
    pub file: Option<PdfSource>,

    /// Name for the new file.
    pub output_name: String,

    /// Raw page list, e.g. `"1,3,5"`.
    pub pages: String,

    /// Serialization options.
    pub options: WriteOptions,
}

impl ExtractRequest {
    /// Create a request with default write options.
    pub fn new(
        file: Option<PdfSource>,
        output_name: impl Into<String>,
        pages: impl Into<String>,
    ) -> Self {
        Self {
            file,
            output_name: output_name.into(),
            pages: pages.into(),
            options: WriteOptions::default(),
        }
    }

    /// Create a request using the default output name.
    pub fn with_default_name(file: Option<PdfSource>, pages: impl Into<String>) -> Self {
        Self::new(file, DEFAULT_EXTRACTED_NAME, pages)
    }

    /// Check that a file, an output name and a page list were provided.
    pub fn validate(&self) -> Result<&PdfSource> {
        match &self.file {
            Some(file) if !self.output_name.is_empty() && !self.pages.is_empty() => Ok(file),
            _ => Err(SpliceError::missing_form_input(EXTRACT_INPUT_MESSAGE)),
        }
    }

    /// Validate and extract, returning every failure as an error.
    pub fn submit(&self) -> Result<Download> {
        let file = self.validate()?;
        let tokens = split_page_list(&self.pages);

        let extracted = Extractor::with_options(self.options).extract(file, &tokens)?;
        Ok(Download {
            file_name: self.output_name.clone(),
            mime_type: PDF_MIME_TYPE,
            bytes: extracted.bytes,
            statistics: extracted.statistics,
        })
    }

    /// Submit the form, reporting to `notifier` the way the extract tab does.
    ///
    /// Missing inputs and page-list problems are reported as errors and yield
    /// `Ok(None)`. A file that cannot be parsed is returned as an error.
    pub fn run(&self, notifier: &dyn Notifier) -> Result<Option<Download>> {
        match self.submit() {
            Ok(download) => {
                notifier.success(EXTRACT_SUCCESS_MESSAGE);
                Ok(Some(download))
            }
            Err(err @ SpliceError::MissingFormInput { .. }) => {
                notifier.error(&err.user_message());
                Ok(None)
            }
            Err(err) if err.is_page_selection_error() => {
                notifier.error(&err.user_message());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
