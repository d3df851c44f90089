//! Conversion between the annotation store and the form document format.
//!
//! Export walks the store hierarchy and emits one field per label; import
//! rebuilds a fresh store from a document. Import is not a byte-level
//! inverse of export (IDs are regenerated), but an exported store imports
//! back into the same names, texts, geometries and groupings.

mod document;
mod export;
mod import;
pub mod io_json;

pub use document::{default_section_bounding_box, FormDocument, FormField, FormInput};
pub use export::{export_store, ExportOptions};
pub use import::{import_document, import_into};
