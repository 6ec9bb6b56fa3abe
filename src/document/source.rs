//! Input side of the page model: raw PDF bytes and their parsed form.

use lopdf::{Document, ObjectId};
use tracing::debug;

use crate::error::{Result, SpliceError};

/// One uploaded PDF: its bytes plus the name it was uploaded under.
///
/// The name is only used in messages; it never influences the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfSource {
    name: String,
    bytes: Vec<u8>,
}

impl PdfSource {
    /// Wrap already-read PDF bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name of the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the source in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parse the source into a [`SourceDocument`].
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::MalformedSource`] if the bytes are not a PDF
    /// that lopdf can read.
    pub fn open(&self) -> Result<SourceDocument> {
        SourceDocument::load(self)
    }
}

/// A parsed source PDF with its pages in document order.
#[derive(Debug)]
pub struct SourceDocument {
    name: String,
    pub(crate) document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse a source's bytes.
    pub fn load(source: &PdfSource) -> Result<Self> {
        let document = Document::load_mem(source.bytes())
            .map_err(|err| SpliceError::malformed_source(source.name(), err))?;

        // get_pages() is keyed by 1-based page number, so values come out in order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();

        debug!(
            source = source.name(),
            pages = page_ids.len(),
            version = %document.version,
            "parsed source document"
        );

        Ok(Self {
            name: source.name().to_string(),
            document,
            page_ids,
        })
    }

    /// Display name of the source this document was parsed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// PDF version from the source header, e.g. `"1.7"`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// The page at a zero-based index, or `None` past the end.
    pub fn page_at(&self, index: usize) -> Option<Page<'_>> {
        self.page_ids.get(index).map(|&id| Page {
            document: self,
            id,
            index,
        })
    }

    /// All pages in natural document order.
    pub fn pages(&self) -> impl Iterator<Item = Page<'_>> + '_ {
        (0..self.page_count()).filter_map(|index| self.page_at(index))
    }
}

/// A borrowed handle to one page of a [`SourceDocument`].
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub(crate) document: &'a SourceDocument,
    pub(crate) id: ObjectId,
    index: usize,
}

impl<'a> Page<'a> {
    /// Zero-based position of the page in its document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based page number, as a user would type it.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The document this page belongs to.
    pub fn document(&self) -> &'a SourceDocument {
        self.document
    }
}
