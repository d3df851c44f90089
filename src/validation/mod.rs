//! Form document and store validation.
//!
//! [`validate_document`] checks a parsed document before it is imported:
//! - Data quality (non-empty section names, label texts and input names)
//! - Geometric validity (finite, properly ordered rectangles)
//! - Vocabulary (known input types and languages)
//! - Consistency (one box per section name, overall box matching contents)
//!
//! [`check_store`] verifies the referential integrity of a live store.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::{HashMap, HashSet};

use crate::format::{default_section_bounding_box, FormDocument, FormField};
use crate::model::vocab::{is_known_input_type, is_known_lang};
use crate::model::{BoundingBox, Entity, EntityId, EntityKind};
use crate::store::AnnotationStore;

/// Coordinate tolerance for comparing rectangles.
const BBOX_EPS: f64 = 1e-6;

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates a form document and returns a report of all issues found.
pub fn validate_document(doc: &FormDocument, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_header(doc, &mut report);

    let mut section_boxes: HashMap<&str, BoundingBox> = HashMap::new();
    for (index, field) in doc.fields.iter().enumerate() {
        validate_field(index, field, &mut section_boxes, &mut report);
    }

    report
}

fn validate_header(doc: &FormDocument, report: &mut ValidationReport) {
    if doc.page_number == 0 {
        report.add(ValidationIssue::error(
            IssueCode::InvalidPageNumber,
            "Page number 0 (pages start at 1)",
            IssueContext::Document,
        ));
    }

    if !check_bbox(&doc.bounding_box, "overall box", IssueContext::Document, report) {
        return;
    }

    let content: Vec<&BoundingBox> = doc.content_boxes().collect();
    if content.iter().any(|b| !b.is_finite()) {
        return;
    }
    if let Some(union) = BoundingBox::union_all(content) {
        if !approx_eq(&union, &doc.bounding_box) {
            report.add(ValidationIssue::warning(
                IssueCode::BoundingBoxMismatch,
                format!(
                    "Overall box {} differs from the union of its contents {}",
                    doc.bounding_box, union
                ),
                IssueContext::Document,
            ));
        }
    }
}

fn validate_field<'a>(
    index: usize,
    field: &'a FormField,
    section_boxes: &mut HashMap<&'a str, BoundingBox>,
    report: &mut ValidationReport,
) {
    let context = IssueContext::Field { index };
    let section = field.section.trim();

    if section.is_empty() {
        report.add(ValidationIssue::error(
            IssueCode::EmptySectionName,
            "Empty section name",
            context.clone(),
        ));
    } else {
        // The first field naming a section decides its box on import.
        match section_boxes.get(section) {
            None => {
                let bbox = field
                    .section_bounding_box
                    .unwrap_or_else(default_section_bounding_box);
                section_boxes.insert(section, bbox);
            }
            Some(first) => {
                if let Some(bbox) = &field.section_bounding_box {
                    if !approx_eq(first, bbox) {
                        report.add(ValidationIssue::warning(
                            IssueCode::SectionBoundingBoxConflict,
                            format!(
                                "Section '{}' repeated with box {} (first seen with {}); the first box is kept",
                                section, bbox, first
                            ),
                            context.clone(),
                        ));
                    }
                }
            }
        }
    }

    if field.label.trim().is_empty() {
        report.add(ValidationIssue::error(
            IssueCode::EmptyLabelText,
            "Empty label text",
            context.clone(),
        ));
    }

    if let Some(bbox) = &field.section_bounding_box {
        check_bbox(bbox, "section box", context.clone(), report);
    }
    check_bbox(&field.bounding_box, "label box", context, report);

    for (input_index, input) in field.inputs.iter().enumerate() {
        let context = IssueContext::Input {
            field: index,
            index: input_index,
        };

        if input.name.trim().is_empty() {
            report.add(ValidationIssue::error(
                IssueCode::EmptyInputName,
                "Empty input name",
                context.clone(),
            ));
        }

        if !is_known_input_type(&input.input_type) {
            report.add(ValidationIssue::warning(
                IssueCode::UnknownInputType,
                format!("Unknown input type '{}'", input.input_type),
                context.clone(),
            ));
        }

        if let Some(lang) = input.lang.as_deref().filter(|l| !l.trim().is_empty()) {
            if !is_known_lang(lang) {
                report.add(ValidationIssue::warning(
                    IssueCode::UnknownLang,
                    format!("Unknown language '{}'", lang),
                    context.clone(),
                ));
            }
        }

        check_bbox(&input.position, "input position", context, report);
    }
}

/// Reports non-finite or inverted rectangles. Returns true if the box is
/// usable.
fn check_bbox(
    bbox: &BoundingBox,
    what: &str,
    context: IssueContext,
    report: &mut ValidationReport,
) -> bool {
    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxNotFinite,
            format!(
                "Non-finite {} ({}, {}, {}, {})",
                what,
                bbox.x0(),
                bbox.y0(),
                bbox.x1(),
                bbox.y1()
            ),
            context,
        ));
        return false;
    }

    if !bbox.is_ordered() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidBBoxOrdering,
            format!(
                "Invalid {} ordering: top-left ({}, {}) should be above and left of bottom-right ({}, {})",
                what,
                bbox.x0(),
                bbox.y0(),
                bbox.x1(),
                bbox.y1()
            ),
            context,
        ));
        return false;
    }

    true
}

fn approx_eq(a: &BoundingBox, b: &BoundingBox) -> bool {
    (a.x0() - b.x0()).abs() <= BBOX_EPS
        && (a.y0() - b.y0()).abs() <= BBOX_EPS
        && (a.x1() - b.x1()).abs() <= BBOX_EPS
        && (a.y1() - b.y1()).abs() <= BBOX_EPS
}

/// Checks the referential integrity of a store.
///
/// A store only mutated through its own API always passes; this exists to
/// assert that after arbitrary operation sequences.
pub fn check_store(store: &AnnotationStore) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut seen: HashSet<EntityId> = HashSet::new();
    for entity in store.entities() {
        let id = entity.id();
        if !seen.insert(id) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateId,
                format!("ID {} is listed more than once", id),
                IssueContext::Entity { id },
            ));
        }
        check_parent_link(store, entity, &mut report);
    }

    // Every indexed child must exist and point back at its parent.
    for entity in store.entities() {
        let parent = entity.id();
        for child in store.child_ids(parent) {
            let points_back = store
                .find_by_id(child)
                .and_then(Entity::parent_id)
                .is_some_and(|p| p == parent);
            if !points_back {
                report.add(ValidationIssue::error(
                    IssueCode::ChildIndexMismatch,
                    format!("Indexed as a child of {} but does not refer to it", parent),
                    IssueContext::Entity { id: child },
                ));
            }
        }
    }

    report
}

fn check_parent_link(store: &AnnotationStore, entity: &Entity, report: &mut ValidationReport) {
    let Some(parent) = entity.parent_id() else {
        return;
    };
    let id = entity.id();

    let (expected, code) = match entity.kind() {
        EntityKind::Label => (EntityKind::Section, IssueCode::DanglingSectionRef),
        EntityKind::Input => (EntityKind::Label, IssueCode::DanglingLabelRef),
        EntityKind::Section => return,
    };

    if store.kind_of(parent) != Some(expected) {
        report.add(ValidationIssue::error(
            code,
            format!("References missing {} {}", expected.code(), parent),
            IssueContext::Entity { id },
        ));
    } else if !store.child_ids(parent).any(|child| child == id) {
        report.add(ValidationIssue::error(
            IssueCode::ChildIndexMismatch,
            format!("Missing from the child index of {}", parent),
            IssueContext::Entity { id },
        ));
    }
}
