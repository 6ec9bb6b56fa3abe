//! Shared helpers for the integration tests.
//!
//! Fixtures are generated in-process with lopdf, so every page carries a
//! recognizable label (`{label}-Page-{n}`) that survives copying.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::path::{Path, PathBuf};

fn label_stream(doc: &mut Document, text: &str) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
}

fn font_resources(doc: &mut Document) -> Dictionary {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    dictionary! { "Font" => dictionary! { "F1" => font_id } }
}

fn finish(mut doc: Document, pages_id: ObjectId) -> Vec<u8> {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// A flat PDF with `pages` labelled pages that inherit their resources.
pub fn sample_pdf(label: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources = font_resources(&mut doc);

    let mut kids = Vec::new();
    for index in 0..pages {
        let content_id = label_stream(&mut doc, &format!("{label}-Page-{}", index + 1));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    finish(doc, pages_id)
}

/// A three-page PDF with a nested page tree.
///
/// Pages 1 and 2 sit under an intermediate node that sets `Rotate 90`;
/// page 3 hangs off the root. MediaBox and Resources live on the root only.
/// Page 1 has a link annotation whose `/P` points back at page 1.
pub fn nested_pdf(label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.6");
    let root_id = doc.new_object_id();
    let middle_id = doc.new_object_id();
    let resources = font_resources(&mut doc);

    let first_id = doc.new_object_id();
    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 10.into(), 10.into()],
        "P" => first_id,
    });
    let content_id = label_stream(&mut doc, &format!("{label}-Page-1"));
    doc.objects.insert(
        first_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => middle_id,
            "Contents" => content_id,
            "Annots" => vec![Object::Reference(annot_id)],
        }),
    );

    let content_id = label_stream(&mut doc, &format!("{label}-Page-2"));
    let second_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => middle_id,
        "Contents" => content_id,
    });

    let content_id = label_stream(&mut doc, &format!("{label}-Page-3"));
    let third_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => root_id,
        "Contents" => content_id,
    });

    doc.objects.insert(
        middle_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => vec![Object::Reference(first_id), Object::Reference(second_id)],
            "Count" => 2,
            "Rotate" => 90,
        }),
    );
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(middle_id), Object::Reference(third_id)],
            "Count" => 3,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 300.into(), 400.into()],
        }),
    );

    finish(doc, root_id)
}

/// A three-page PDF whose pages link to each other.
///
/// - page 1: Link annotation with `/Dest [page-2 /Fit]` and `/P` page 1
/// - page 2: Link annotation with a `GoTo` action to page 1 and a
///   `/Contents` reference to an object that does not exist
/// - page 3: Link annotation with `/Dest [page-3 /Fit]`
pub fn linked_pdf(label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources = font_resources(&mut doc);
    let page_ids: Vec<ObjectId> = (0..3).map(|_| doc.new_object_id()).collect();

    let rect = || Object::Array(vec![0.into(), 0.into(), 10.into(), 10.into()]);
    let annots = [
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect(),
            "P" => page_ids[0],
            "Dest" => vec![Object::Reference(page_ids[1]), "Fit".into()],
        },
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect(),
            "Contents" => Object::Reference((9999, 0)),
            "A" => dictionary! {
                "S" => "GoTo",
                "D" => vec![Object::Reference(page_ids[0]), "Fit".into()],
            },
        },
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect(),
            "Dest" => vec![Object::Reference(page_ids[2]), "Fit".into()],
        },
    ];

    for (index, annot) in annots.into_iter().enumerate() {
        let annot_id = doc.add_object(annot);
        let content_id = label_stream(&mut doc, &format!("{label}-Page-{}", index + 1));
        doc.objects.insert(
            page_ids[index],
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Annots" => vec![Object::Reference(annot_id)],
            }),
        );
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
            "Count" => 3,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    finish(doc, pages_id)
}

/// Write a labelled fixture into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, label: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, sample_pdf(label, pages)).unwrap();
    path
}

/// The label drawn on each page, in page order.
pub fn page_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let content = doc.get_page_content(id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').unwrap() + 1;
            let end = start + text[start..].find(')').unwrap();
            text[start..end].to_string()
        })
        .collect()
}

/// The page dictionary of the 1-based page `number`.
pub fn page_dict(doc: &Document, number: u32) -> (ObjectId, Dictionary) {
    let id = *doc.get_pages().get(&number).unwrap();
    let dict = doc.get_object(id).and_then(Object::as_dict).unwrap().clone();
    (id, dict)
}

/// The id and dictionary of the first annotation on the 1-based page `number`.
pub fn first_annotation(doc: &Document, number: u32) -> (ObjectId, Dictionary) {
    let (_, page) = page_dict(doc, number);
    let annots = page.get(b"Annots").and_then(Object::as_array).unwrap();
    let id = annots[0].as_reference().unwrap();
    let dict = doc.get_object(id).and_then(Object::as_dict).unwrap().clone();
    (id, dict)
}

/// The page a link annotation jumps to: `/Dest` or the `/D` of its action.
pub fn link_target(annot: &Dictionary) -> Object {
    let destination = annot
        .get(b"Dest")
        .or_else(|_| annot.get(b"A").and_then(Object::as_dict).and_then(|a| a.get(b"D")))
        .and_then(Object::as_array)
        .unwrap();
    destination[0].clone()
}
