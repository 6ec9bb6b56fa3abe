//! Extract: copy selected pages of one PDF into a new document.
//!
//! Page numbers arrive as raw text, one token per requested page. Tokens are
//! checked in order and the first bad one stops the operation, so either
//! every requested page is copied or nothing is produced.

use std::num::IntErrorKind;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::WriteOptions;
use crate::document::{OutputDocument, PdfSource};
use crate::error::{Result, SpliceError};
use crate::ops::{OperationOutput, OperationStatistics};

/// Parse one page token and check it against `page_count`.
///
/// Surrounding whitespace is ignored and an explicit sign is accepted, so
/// `" 3"` and `"+3"` both select page 3. Returns the 1-based page number.
///
/// # Errors
///
/// - [`SpliceError::NonNumericPage`] if the token is not an integer (this
///   includes the empty token)
/// - [`SpliceError::OutOfRangePage`] if the number is below 1 or above
///   `page_count`; a numeral too long for a machine integer is out of range
///
/// # Examples
///
/// ```
/// use pdfsplice::ops::parse_page_token;
///
/// assert_eq!(parse_page_token(" 2", 5).unwrap(), 2);
/// assert!(parse_page_token("6", 5).is_err());
/// assert!(parse_page_token("two", 5).is_err());
/// ```
pub fn parse_page_token(token: &str, page_count: usize) -> Result<usize> {
    let trimmed = token.trim();

    match trimmed.parse::<i64>() {
        Ok(number) if number >= 1 && (number as u64) <= (page_count as u64) => Ok(number as usize),
        Ok(number) => Err(SpliceError::out_of_range_page(number.to_string(), page_count)),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(SpliceError::out_of_range_page(
                normalize_numeral(trimmed),
                page_count,
            ))
        }
        Err(_) => Err(SpliceError::non_numeric_page(token)),
    }
}

/// Canonical decimal form of a valid integer literal: no `+`, no leading zeros.
fn normalize_numeral(numeral: &str) -> String {
    let (negative, digits) = match numeral.as_bytes().first() {
        Some(b'-') => (true, &numeral[1..]),
        Some(b'+') => (false, &numeral[1..]),
        _ => (false, numeral),
    };
    let digits = digits.trim_start_matches('0');

    match (negative, digits.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{digits}"),
        (false, false) => digits.to_string(),
    }
}

/// A validated, ordered list of 1-based page numbers.
///
/// Duplicates are kept; they produce repeated pages in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: Vec<usize>,
}

impl PageSelection {
    /// Validate `tokens` against a document with `page_count` pages.
    ///
    /// Stops at the first invalid token.
    pub fn parse<S: AsRef<str>>(tokens: &[S], page_count: usize) -> Result<Self> {
        let pages = tokens
            .iter()
            .map(|token| parse_page_token(token.as_ref(), page_count))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { pages })
    }

    /// Page numbers in request order.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Number of pages selected.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page is selected.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Extract the pages named by `tokens` from `source` with default write
/// options.
///
/// # Errors
///
/// - [`SpliceError::MalformedSource`] if the source cannot be parsed; this
///   is reported before any token is looked at
/// - [`SpliceError::NonNumericPage`] or [`SpliceError::OutOfRangePage`] for
///   the first invalid token
///
/// # Examples
///
/// ```no_run
/// # use pdfsplice::document::PdfSource;
/// # fn example(bytes: Vec<u8>) -> pdfsplice::Result<()> {
/// let source = PdfSource::new("report.pdf", bytes);
/// let selected = pdfsplice::ops::extract(&source, &["3", "1"])?;
/// std::fs::write("selected_pages.pdf", selected)?;
/// # Ok(())
/// # }
/// ```
pub fn extract<S: AsRef<str>>(source: &PdfSource, tokens: &[S]) -> Result<Vec<u8>> {
    Extractor::new()
        .extract(source, tokens)
        .map(|extracted| extracted.bytes)
}

/// Page extractor with configurable write options.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: WriteOptions,
}

impl Extractor {
    /// Create an extractor with default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor that serializes with `options`.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Extract the pages named by `tokens` and report statistics alongside
    /// the bytes.
    pub fn extract<S: AsRef<str>>(
        &self,
        source: &PdfSource,
        tokens: &[S],
    ) -> Result<OperationOutput> {
        let start = Instant::now();
        let document = source.open()?;
        let page_count = document.page_count();

        let selection = PageSelection::parse(tokens, page_count)?;
        debug!(
            source = source.name(),
            requested = ?selection.pages(),
            page_count,
            "validated page selection"
        );

        let mut output = OutputDocument::new();
        let mut importer = output.importer(&document);
        for &number in selection.pages() {
            let page = document
                .page_at(number - 1)
                .ok_or_else(|| SpliceError::out_of_range_page(number.to_string(), page_count))?;
            importer.append_page(page)?;
        }

        let bytes = output.serialize(&self.options)?;

        let statistics = OperationStatistics {
            sources: 1,
            input_size: source.len() as u64,
            pages: selection.len(),
            output_size: bytes.len() as u64,
            elapsed: start.elapsed(),
        };

        info!(
            source = source.name(),
            pages = statistics.pages,
            bytes = statistics.output_size,
            "extracted pages"
        );

        Ok(OperationOutput { bytes, statistics })
    }
}
