#![allow(dead_code)]

use std::path::Path;

use formtag::format::io_json::{read_document, write_document};
use formtag::format::FormDocument;

pub fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> FormDocument {
    read_document(&fixture_path(name)).expect("read fixture document")
}

/// Writes the valid sample with its first input tagged as French, which
/// only produces a warning.
pub fn write_document_with_unknown_lang(path: &Path) {
    let mut doc = read_fixture("sample_valid.form.json");
    doc.fields[0].inputs[0].lang = Some("fr".into());
    write_document(path, &doc).expect("write document");
}
