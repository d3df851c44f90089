//! Validation report types for structured error reporting.
//!
//! Reports can be printed for users, serialized to JSON, or inspected
//! programmatically by issue code.

use serde::Serialize;
use std::fmt;

use crate::model::EntityId;

/// The result of validating a form document or a store.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    pub message: String,

    /// Where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Loadable, but probably not what the author meant.
    Warning,
    /// The document cannot be imported as is, or the store is corrupt.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Document issues
    /// `pageNumber` is 0 (pages are 1-based).
    InvalidPageNumber,
    /// A field has a blank section name.
    EmptySectionName,
    /// A field has blank label text.
    EmptyLabelText,
    /// An input has a blank name.
    EmptyInputName,
    /// The same section name appears with different section boxes; only the
    /// first is kept on import.
    SectionBoundingBoxConflict,
    /// The overall box is not the union of the content boxes.
    BoundingBoxMismatch,

    // Vocabulary issues
    /// An input type outside the known vocabulary.
    UnknownInputType,
    /// A language code outside the known vocabulary.
    UnknownLang,

    // Geometry issues
    /// A rectangle has non-finite coordinates (NaN or Infinity).
    BBoxNotFinite,
    /// A rectangle's top-left corner is not above and left of its
    /// bottom-right corner.
    InvalidBBoxOrdering,

    // Store integrity issues
    /// A label points at a section that does not exist.
    DanglingSectionRef,
    /// An input points at a label that does not exist.
    DanglingLabelRef,
    /// The parent-to-children index disagrees with the entities.
    ChildIndexMismatch,
    /// An ID appears in more than one ordering set.
    DuplicateId,
}

/// Where a validation issue occurred.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum IssueContext {
    /// The document header (form type, page number, overall box).
    Document,
    /// The field at this position in `fields`.
    Field { index: usize },
    /// An input within a field.
    Input { field: usize, index: usize },
    /// A stored entity.
    Entity { id: EntityId },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Document => write!(f, "document"),
            IssueContext::Field { index } => write!(f, "field {}", index),
            IssueContext::Input { field, index } => write!(f, "field {} input {}", field, index),
            IssueContext::Entity { id } => write!(f, "entity {}", id),
        }
    }
}
