//! Output side of the page model: an append-only page sequence that is
//! serialized once.
//!
//! Appending a page copies the page dictionary and every object reachable
//! from it into the output under fresh object numbers. The walk is
//! breadth-first with an explicit queue, so deeply linked structures cannot
//! overflow the stack.
//!
//! References to other pages of the source (link destinations, `GoTo`
//! actions) are not followed while copying. They get a placeholder that is
//! resolved when the document is serialized: to the first copy of that page
//! if it was appended, to `null` otherwise.

use std::collections::{HashMap, HashSet, VecDeque};

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::config::{CompressionLevel, WriteOptions};
use crate::document::source::{Page, SourceDocument};
use crate::error::{Result, SpliceError};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Lowest version written.
const MIN_VERSION: &str = "1.5";

/// Generation of placeholder ids. 65535 is reserved for free entries, so no
/// copied object ever carries it.
const PLACEHOLDER_GENERATION: u16 = u16::MAX;

/// A new PDF being assembled page by page.
#[derive(Debug)]
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    /// Importers created so far; an importer's index identifies its source.
    sources: usize,
    /// First output copy of each appended page, keyed by source and page id.
    appended: HashMap<(usize, ObjectId), ObjectId>,
    /// Page placeholders and the source page each one stands for.
    placeholders: HashMap<ObjectId, (usize, ObjectId)>,
}

impl OutputDocument {
    /// Create an empty output document.
    pub fn new() -> Self {
        let mut document = Document::with_version(MIN_VERSION);
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
            sources: 0,
            appended: HashMap::new(),
            placeholders: HashMap::new(),
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// True when no page has been appended.
    pub fn is_empty(&self) -> bool {
        self.kids.is_empty()
    }

    /// Start copying pages out of `source`.
    ///
    /// Objects shared by several pages of the same source (fonts, images)
    /// are copied once for the lifetime of the returned importer. Each call
    /// counts as a new source, even for a document seen before.
    pub fn importer<'o, 's>(&'o mut self, source: &'s SourceDocument) -> PageImporter<'o, 's> {
        self.raise_version(source.version());
        let source_index = self.sources;
        self.sources += 1;

        PageImporter {
            output: self,
            source,
            source_index,
            copied: HashMap::new(),
            page_links: HashMap::new(),
        }
    }

    /// Serialize the document into a complete PDF file image.
    pub fn serialize(mut self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.resolve_page_links();

        let kids: Vec<Object> = self.kids.iter().map(|&id| Object::Reference(id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.kids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        if options.compression == CompressionLevel::Standard {
            self.document.compress();
        }

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(SpliceError::serialize_failed)?;

        debug!(
            pages = self.kids.len(),
            bytes = buffer.len(),
            "serialized output document"
        );

        Ok(buffer)
    }

    fn raise_version(&mut self, version: &str) {
        if version_key(version) > version_key(&self.document.version) {
            self.document.version = version.trim().to_string();
        }
    }

    fn placeholder(&mut self, source_index: usize, page_id: ObjectId) -> ObjectId {
        let id = (self.placeholders.len() as u32 + 1, PLACEHOLDER_GENERATION);
        self.placeholders.insert(id, (source_index, page_id));
        id
    }

    /// Point every page placeholder at its page, or at `null` if the page
    /// never made it into the output.
    fn resolve_page_links(&mut self) {
        if self.placeholders.is_empty() {
            return;
        }

        let targets: HashMap<ObjectId, Object> = self
            .placeholders
            .iter()
            .map(|(&placeholder, key)| {
                let target = self
                    .appended
                    .get(key)
                    .map_or(Object::Null, |&id| Object::Reference(id));
                (placeholder, target)
            })
            .collect();

        for object in self.document.objects.values_mut() {
            replace_placeholders(object, &targets);
        }
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Which memo an object copied during [`PageImporter::append_page`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Shared by all pages of the source: resources, fonts, images.
    Source,
    /// Owned by one page copy: everything reached through `/Annots`.
    Page,
}

/// State of a single page copy.
struct PageCopy {
    /// Source page id and the id of its copy.
    page: (ObjectId, ObjectId),
    pending: VecDeque<(ObjectId, ObjectId, Scope)>,
    /// Memo for [`Scope::Page`] objects.
    owned: HashMap<ObjectId, ObjectId>,
}

/// Copies pages from one source document into an [`OutputDocument`].
pub struct PageImporter<'o, 's> {
    output: &'o mut OutputDocument,
    source: &'s SourceDocument,
    source_index: usize,
    /// Source object id to output object id, for shared objects.
    copied: HashMap<ObjectId, ObjectId>,
    /// Source page id to its placeholder.
    page_links: HashMap<ObjectId, ObjectId>,
}

impl<'o, 's> PageImporter<'o, 's> {
    /// Append a copy of `page` to the end of the output document.
    ///
    /// Appending the same page twice yields two independent page objects,
    /// each with its own annotations. Returns the object id of the new page
    /// in the output.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::MalformedSource`] if the page object is not a
    /// dictionary.
    pub fn append_page(&mut self, page: Page<'s>) -> Result<ObjectId> {
        debug_assert!(
            std::ptr::eq(page.document, self.source),
            "page appended through an importer for a different document"
        );

        let source = self.source;
        let mut page_dict = source
            .document
            .get_object(page.id)
            .and_then(Object::as_dict)
            .map_err(|err| SpliceError::malformed_source(source.name(), err))?
            .clone();

        for key in INHERITABLE_KEYS {
            if !page_dict.has(key)
                && let Some(value) = inherited_attribute(&source.document, &page_dict, key)
            {
                page_dict.set(key, value);
            }
        }
        page_dict.remove(b"Parent");

        let new_page_id = self.output.document.new_object_id();
        let mut copy = PageCopy {
            page: (page.id, new_page_id),
            pending: VecDeque::new(),
            owned: HashMap::new(),
        };

        for (key, value) in page_dict.iter_mut() {
            let scope = if key.as_slice() == b"Annots" {
                Scope::Page
            } else {
                Scope::Source
            };
            self.rewrite(value, scope, &mut copy);
        }
        page_dict.set("Parent", Object::Reference(self.output.pages_id));

        self.output
            .document
            .objects
            .insert(new_page_id, Object::Dictionary(page_dict));

        while let Some((source_id, output_id, scope)) = copy.pending.pop_front() {
            let mut object = source
                .document
                .get_object(source_id)
                .cloned()
                .unwrap_or(Object::Null);
            self.rewrite(&mut object, scope, &mut copy);
            self.output.document.objects.insert(output_id, object);
        }

        self.output.kids.push(new_page_id);
        self.output
            .appended
            .entry((self.source_index, page.id))
            .or_insert(new_page_id);

        debug!(
            source = source.name(),
            page = page.number(),
            output_page = self.output.kids.len(),
            "appended page"
        );

        Ok(new_page_id)
    }

    /// Replace every reference inside `object` by its output counterpart.
    fn rewrite(&mut self, object: &mut Object, scope: Scope, copy: &mut PageCopy) {
        if let Object::Reference(id) = *object {
            *object = self.map_reference(id, scope, copy);
            return;
        }

        match object {
            Object::Array(items) => {
                for item in items.iter_mut() {
                    self.rewrite(item, scope, copy);
                }
            }
            Object::Dictionary(dict) => {
                for (_, value) in dict.iter_mut() {
                    self.rewrite(value, scope, copy);
                }
            }
            Object::Stream(stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    self.rewrite(value, scope, copy);
                }
            }
            _ => {}
        }
    }

    fn map_reference(&mut self, id: ObjectId, scope: Scope, copy: &mut PageCopy) -> Object {
        if id == copy.page.0 {
            return Object::Reference(copy.page.1);
        }

        let memo = match scope {
            Scope::Source => &self.copied,
            Scope::Page => &copy.owned,
        };
        if let Some(&mapped) = memo.get(&id) {
            return Object::Reference(mapped);
        }

        let source = self.source;
        let node = match source.document.get_object(id) {
            Ok(target) => classify(target),
            Err(_) => return Object::Null,
        };

        match node {
            Node::Page => Object::Reference(self.page_link(id)),
            // Following these would drag the whole source page tree along.
            Node::Pages => Object::Null,
            Node::Other => {
                let new_id = self.output.document.new_object_id();
                match scope {
                    Scope::Source => self.copied.insert(id, new_id),
                    Scope::Page => copy.owned.insert(id, new_id),
                };
                copy.pending.push_back((id, new_id, scope));
                Object::Reference(new_id)
            }
        }
    }

    fn page_link(&mut self, page_id: ObjectId) -> ObjectId {
        if let Some(&placeholder) = self.page_links.get(&page_id) {
            return placeholder;
        }

        let placeholder = self.output.placeholder(self.source_index, page_id);
        self.page_links.insert(page_id, placeholder);
        placeholder
    }
}

fn replace_placeholders(object: &mut Object, targets: &HashMap<ObjectId, Object>) {
    if let Object::Reference(id) = *object {
        if let Some(target) = targets.get(&id) {
            *object = target.clone();
        }
        return;
    }

    match object {
        Object::Array(items) => {
            for item in items.iter_mut() {
                replace_placeholders(item, targets);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                replace_placeholders(value, targets);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                replace_placeholders(value, targets);
            }
        }
        _ => {}
    }
}

/// Look `key` up on the ancestors of a page, nearest first.
fn inherited_attribute(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(id) = parent {
        if !visited.insert(id) {
            break;
        }

        let node = document.get_object(id).and_then(Object::as_dict).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Page,
    Pages,
    Other,
}

fn classify(object: &Object) -> Node {
    let Ok(dict) = object.as_dict() else {
        return Node::Other;
    };

    match dict.get(b"Type").and_then(Object::as_name) {
        Ok(b"Page") => Node::Page,
        Ok(b"Pages") => Node::Pages,
        _ => Node::Other,
    }
}

/// `"1.7"` becomes `(1, 7)`; anything unparsable sorts lowest.
fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}
