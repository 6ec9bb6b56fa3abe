//! Error types for pdfsplice.
//!
//! Every fallible operation in the crate returns [`SpliceError`]. The
//! variants fall into three groups:
//!
//! - **Source errors**: an input cannot be parsed as a PDF.
//! - **Page selection errors**: a requested page is not a number or lies
//!   outside the source document. These carry a user-facing message
//!   (see [`SpliceError::user_message`]) that the form layer shows as-is.
//! - **I/O and configuration errors**: reading inputs, writing the output,
//!   invalid flag combinations.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

/// Message shown when a page-list entry is not an integer.
pub const NON_NUMERIC_PAGE_MESSAGE: &str =
    "Please make sure all entries in the pages list are numbers.";

/// Main error type for pdfsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    /// An input could not be parsed as a PDF document.
    #[error("Failed to parse PDF: {name}\n  Reason: {reason}")]
    MalformedSource {
        /// Display name of the source (usually its file name).
        name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A page-list entry is not an integer.
    #[error("Invalid page number '{token}': not a number")]
    NonNumericPage {
        /// The raw entry as the user typed it.
        token: String,
    },

    /// A requested page number lies outside the source document.
    #[error("Page {page} is out of range (document has {page_count} page(s))")]
    OutOfRangePage {
        /// The requested page number, normalized (surrounding whitespace removed).
        page: String,
        /// Number of pages in the source document.
        page_count: usize,
    },

    /// Merge was asked to combine an empty list of sources.
    #[error("No input files specified for merging")]
    NoInputSources,

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file could not be read.
    #[error("Failed to read file: {}\n  Reason: {source}", .path.display())]
    FailedToRead {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An input pattern is not a valid glob.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The assembled document could not be serialized.
    #[error("Failed to serialize output document: {reason}")]
    SerializeFailed {
        /// Writer diagnostic.
        reason: String,
    },

    /// A required form field (files, output name or page list) was left empty.
    #[error("{message}")]
    MissingFormInput {
        /// The message the form shows to the user.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User declined to overwrite an existing output file.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl From<anyhow::Error> for SpliceError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl SpliceError {
    /// Create a MalformedSource error.
    pub fn malformed_source(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedSource {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a NonNumericPage error.
    pub fn non_numeric_page(token: impl Into<String>) -> Self {
        Self::NonNumericPage {
            token: token.into(),
        }
    }

    /// Create an OutOfRangePage error.
    pub fn out_of_range_page(page: impl Into<String>, page_count: usize) -> Self {
        Self::OutOfRangePage {
            page: page.into(),
            page_count,
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a SerializeFailed error.
    pub fn serialize_failed(reason: impl ToString) -> Self {
        Self::SerializeFailed {
            reason: reason.to_string(),
        }
    }

    /// Create a MissingFormInput error.
    pub fn missing_form_input(message: impl Into<String>) -> Self {
        Self::MissingFormInput {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for errors caused by the page list rather than the document.
    pub fn is_page_selection_error(&self) -> bool {
        matches!(
            self,
            Self::NonNumericPage { .. } | Self::OutOfRangePage { .. }
        )
    }

    /// The single message shown to the user for this error.
    ///
    /// Page selection errors use the exact wording of the extraction form;
    /// everything else falls back to the `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::NonNumericPage { .. } => NON_NUMERIC_PAGE_MESSAGE.to_string(),
            Self::OutOfRangePage { page, .. } => format!("Page {page} is out of range."),
            other => other.to_string(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToRead { .. } => 2,
            Self::MalformedSource { .. } => 3,
            Self::NoInputSources => 1,
            Self::NonNumericPage { .. } => 1,
            Self::OutOfRangePage { .. } => 1,
            Self::MissingFormInput { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::InvalidPattern { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::SerializeFailed { .. } => 6,
            Self::Cancelled => 130,
        }
    }
}
