//! Integration tests for the form workflow layer.

use std::cell::RefCell;

use pdfsplice::PdfSource;
use pdfsplice::form::{
    EXTRACT_INPUT_MESSAGE, ExtractRequest, MERGE_INPUT_MESSAGE, MergeRequest, Notifier,
    PDF_MIME_TYPE, merge_pdfs, save_selected_pages, split_page_list,
};

use crate::common::{page_labels, sample_pdf};

#[derive(Default)]
struct Messages(RefCell<Vec<String>>);

impl Messages {
    fn all(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for Messages {
    fn error(&self, message: &str) {
        self.0.borrow_mut().push(format!("error: {message}"));
    }

    fn success(&self, message: &str) {
        self.0.borrow_mut().push(format!("success: {message}"));
    }
}

fn upload(label: &str, pages: usize) -> PdfSource {
    PdfSource::new(format!("{label}.pdf"), sample_pdf(label, pages))
}

#[test]
fn test_merge_pdfs_contract() {
    let bytes = merge_pdfs(&[upload("B", 1), upload("A", 1)]).unwrap();
    assert_eq!(page_labels(&bytes), vec!["B-Page-1", "A-Page-1"]);
}

#[test]
fn test_save_selected_pages_with_form_split() {
    let messages = Messages::default();
    let tokens = split_page_list("5, 1,3");
    let bytes = save_selected_pages(&upload("P", 5), "selected_pages.pdf", &tokens, &messages)
        .unwrap()
        .unwrap();

    assert_eq!(page_labels(&bytes), vec!["P-Page-5", "P-Page-1", "P-Page-3"]);
    assert!(messages.all().is_empty());
}

#[test]
fn test_save_selected_pages_trailing_comma() {
    let messages = Messages::default();
    let tokens = split_page_list("1,2,");
    let result = save_selected_pages(&upload("P", 5), "out.pdf", &tokens, &messages).unwrap();

    assert!(result.is_none());
    assert_eq!(
        messages.all(),
        vec!["error: Please make sure all entries in the pages list are numbers."]
    );
}

#[test]
fn test_merge_tab_round_trip() {
    let messages = Messages::default();

    let empty = MergeRequest::new(Vec::new(), "merged.pdf");
    assert!(empty.run(&messages).unwrap().is_none());

    let filled = MergeRequest::new(vec![upload("A", 2), upload("B", 1)], "merged.pdf");
    let download = filled.run(&messages).unwrap().unwrap();

    assert_eq!(download.mime_type, PDF_MIME_TYPE);
    assert_eq!(download.file_name, "merged.pdf");
    assert_eq!(download.statistics.pages, 3);
    assert_eq!(
        messages.all(),
        vec![
            format!("error: {MERGE_INPUT_MESSAGE}"),
            "success: PDFs merged successfully!".to_string(),
        ]
    );
}

#[test]
fn test_extract_tab_round_trip() {
    let messages = Messages::default();

    let missing_pages = ExtractRequest::new(Some(upload("P", 3)), "selected.pdf", "");
    assert!(missing_pages.run(&messages).unwrap().is_none());

    let out_of_range = ExtractRequest::new(Some(upload("P", 3)), "selected.pdf", "1,4");
    assert!(out_of_range.run(&messages).unwrap().is_none());

    let good = ExtractRequest::new(Some(upload("P", 3)), "selected.pdf", "3,3,1");
    let download = good.run(&messages).unwrap().unwrap();
    assert_eq!(
        page_labels(&download.bytes),
        vec!["P-Page-3", "P-Page-3", "P-Page-1"]
    );

    assert_eq!(
        messages.all(),
        vec![
            format!("error: {EXTRACT_INPUT_MESSAGE}"),
            "error: Page 4 is out of range.".to_string(),
            "success: Pages extracted successfully!".to_string(),
        ]
    );
}
