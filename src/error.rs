use std::path::PathBuf;
use thiserror::Error;

use crate::model::{EntityId, EntityKind};
use crate::validation::ValidationReport;

/// The main error type for formtag operations.
#[derive(Debug, Error)]
pub enum FormtagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{kind} {field} must not be empty")]
    Validation {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind} parent {parent} does not refer to an existing {}", expected_parent(.kind))]
    Reference { kind: EntityKind, parent: EntityId },

    #[error("No section, label or input with id {0}")]
    NotFound(EntityId),

    #[error("Failed to parse form document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to parse form document from {path}: {source}")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write form document to {path}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("Failed to read event script from {path}: {source}")]
    InvalidEventScript {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}

fn expected_parent(kind: &EntityKind) -> &'static str {
    match kind.parent_kind() {
        Some(EntityKind::Section) => "section",
        Some(EntityKind::Label) => "label",
        _ => "parent",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = FormtagError::Validation {
            kind: EntityKind::Section,
            field: "name",
        };
        assert_eq!(err.to_string(), "Section name must not be empty");

        let err = FormtagError::Reference {
            kind: EntityKind::Input,
            parent: EntityId(7),
        };
        assert_eq!(
            err.to_string(),
            "Input parent 7 does not refer to an existing label"
        );

        let err = FormtagError::NotFound(EntityId(9));
        assert_eq!(err.to_string(), "No section, label or input with id 9");
    }
}
