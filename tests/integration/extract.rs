//! Integration tests for page extraction.

use lopdf::{Document, Object};
use pdfsplice::ops::{Extractor, PageSelection};
use pdfsplice::{PdfSource, SpliceError, extract};
use rstest::rstest;

use crate::common::{
    first_annotation, link_target, linked_pdf, nested_pdf, page_dict, page_labels, sample_pdf,
};

fn five_pages() -> PdfSource {
    PdfSource::new("five.pdf", sample_pdf("P", 5))
}

#[rstest]
#[case(&["3", "1"], &["P-Page-3", "P-Page-1"])]
#[case(&["2", "2"], &["P-Page-2", "P-Page-2"])]
#[case(&["5"], &["P-Page-5"])]
#[case(&["1", "2", "3", "4", "5"], &["P-Page-1", "P-Page-2", "P-Page-3", "P-Page-4", "P-Page-5"])]
#[case(&[" 4 ", "+1"], &["P-Page-4", "P-Page-1"])]
fn test_extract_pages(#[case] tokens: &[&str], #[case] expected: &[&str]) {
    let bytes = extract(&five_pages(), tokens).unwrap();
    assert_eq!(page_labels(&bytes), expected);
}

#[rstest]
#[case(&["0"])]
#[case(&["6"])]
#[case(&["1", "6"])]
#[case(&["-2"])]
#[case(&["123456789012345678901234567890"])]
fn test_extract_out_of_range(#[case] tokens: &[&str]) {
    assert!(matches!(
        extract(&five_pages(), tokens),
        Err(SpliceError::OutOfRangePage { page_count: 5, .. })
    ));
}

#[rstest]
#[case(&["2", "x"])]
#[case(&[""])]
#[case(&["1.0"])]
#[case(&["x", "6"])]
fn test_extract_non_numeric(#[case] tokens: &[&str]) {
    assert!(matches!(
        extract(&five_pages(), tokens),
        Err(SpliceError::NonNumericPage { .. })
    ));
}

#[test]
fn test_extract_first_error_wins() {
    let err = extract(&five_pages(), &["7", "x"]).unwrap_err();
    assert_eq!(err.user_message(), "Page 7 is out of range.");

    let err = extract(&five_pages(), &["x", "7"]).unwrap_err();
    assert_eq!(
        err.user_message(),
        "Please make sure all entries in the pages list are numbers."
    );
}

#[test]
fn test_extract_materializes_inherited_attributes() {
    let source = PdfSource::new("nested.pdf", nested_pdf("N"));
    let bytes = extract(&source, &["2", "3"]).unwrap();
    assert_eq!(page_labels(&bytes), vec!["N-Page-2", "N-Page-3"]);

    let doc = Document::load_mem(&bytes).unwrap();
    let (_, first) = page_dict(&doc, 1);
    let (_, second) = page_dict(&doc, 2);

    assert_eq!(first.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
    assert!(second.get(b"Rotate").is_err());
    for page in [&first, &second] {
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_i64().unwrap(), 300);
        assert!(page.has(b"Resources"));
    }
}

#[test]
fn test_extract_drops_unselected_pages() {
    let source = PdfSource::new("nested.pdf", nested_pdf("N"));
    let bytes = extract(&source, &["3"]).unwrap();

    let doc = Document::load_mem(&bytes).unwrap();
    let page_objects = doc
        .objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| matches!(dict.get(b"Type").and_then(|t| t.as_name()), Ok(b"Page")))
        .count();
    assert_eq!(page_objects, 1);
}

#[test]
fn test_extract_repeatable() {
    let source = five_pages();
    assert_eq!(
        extract(&source, &["4", "2", "4"]).unwrap(),
        extract(&source, &["4", "2", "4"]).unwrap()
    );
}

#[test]
fn test_extract_statistics() {
    let source = five_pages();
    let extracted = Extractor::new().extract(&source, &["1", "3"]).unwrap();

    assert_eq!(extracted.statistics.sources, 1);
    assert_eq!(extracted.statistics.pages, 2);
    assert_eq!(extracted.statistics.input_size, source.len() as u64);
}

#[test]
fn test_page_selection_is_public() {
    let selection = PageSelection::parse(&["5", "1"], 5).unwrap();
    assert_eq!(selection.pages(), &[5, 1]);
}

fn linked() -> PdfSource {
    PdfSource::new("linked.pdf", linked_pdf("L"))
}

fn extracted(tokens: &[&str]) -> Document {
    Document::load_mem(&extract(&linked(), tokens).unwrap()).unwrap()
}

#[test]
fn test_extract_keeps_links_to_selected_pages() {
    let doc = extracted(&["1", "2"]);
    let (_, forward) = first_annotation(&doc, 1);
    let (_, back) = first_annotation(&doc, 2);

    assert_eq!(link_target(&forward), Object::Reference(page_dict(&doc, 2).0));
    assert_eq!(link_target(&back), Object::Reference(page_dict(&doc, 1).0));
}

#[test]
fn test_extract_link_to_unselected_page_is_null() {
    let doc = extracted(&["1", "3"]);
    let (_, forward) = first_annotation(&doc, 1);
    let (_, own) = first_annotation(&doc, 2);

    assert_eq!(link_target(&forward), Object::Null);
    assert_eq!(link_target(&own), Object::Reference(page_dict(&doc, 2).0));
}

#[test]
fn test_extract_link_goes_to_first_copy() {
    let doc = extracted(&["1", "1", "2"]);
    let target = Object::Reference(page_dict(&doc, 3).0);

    assert_eq!(link_target(&first_annotation(&doc, 1).1), target);
    assert_eq!(link_target(&first_annotation(&doc, 2).1), target);
}

#[test]
fn test_extract_repeated_page_has_own_annotations() {
    let doc = extracted(&["1", "1"]);
    let (first_id, first) = first_annotation(&doc, 1);
    let (second_id, second) = first_annotation(&doc, 2);

    assert_ne!(first_id, second_id);
    assert_eq!(first.get(b"P").unwrap(), &Object::Reference(page_dict(&doc, 1).0));
    assert_eq!(second.get(b"P").unwrap(), &Object::Reference(page_dict(&doc, 2).0));
}

