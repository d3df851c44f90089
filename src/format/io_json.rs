//! JSON reading and writing for form documents.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::document::FormDocument;
use crate::error::FormtagError;

/// Reads a form document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_document(path: &Path) -> Result<FormDocument, FormtagError> {
    let file = File::open(path).map_err(FormtagError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| FormtagError::DocumentParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a form document to a JSON file, pretty-printed with a trailing
/// newline.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_document(path: &Path, doc: &FormDocument) -> Result<(), FormtagError> {
    let file = File::create(path).map_err(FormtagError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, doc).map_err(|source| {
        FormtagError::DocumentWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Parses a form document from a JSON string.
pub fn from_json_str(json: &str) -> Result<FormDocument, FormtagError> {
    serde_json::from_str(json).map_err(FormtagError::Parse)
}

/// Parses a form document from raw bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<FormDocument, FormtagError> {
    serde_json::from_slice(bytes).map_err(FormtagError::Parse)
}

/// Serializes a form document to a pretty-printed JSON string.
pub fn to_json_string(doc: &FormDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// File name for a download-style export: `annotation_<unix millis>.json`.
pub fn default_export_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("annotation_{}.json", millis)
}
