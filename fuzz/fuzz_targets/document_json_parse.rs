//! Fuzz target for form document parsing and import.
//!
//! Arbitrary bytes go through the JSON parser; anything that parses is
//! validated and imported, which must never panic.

#![no_main]

use formtag::format::import_document;
use formtag::format::io_json::from_json_slice;
use formtag::validation::{validate_document, ValidateOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(doc) = from_json_slice(data) {
        let _ = validate_document(&doc, &ValidateOptions::default());
        let _ = import_document(&doc);
    }
});
