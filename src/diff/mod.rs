//! Form document semantic diffing.
//!
//! Documents are compared by meaning, not by position in the `fields`
//! list: sections match by name, labels by (section, text) and inputs by
//! (section, label, name). Repeated keys are paired in document order.

mod report;

pub use report::{Changed, DiffCounts, DiffDetail, DiffReport, ModifiedItem};

use std::collections::{BTreeMap, BTreeSet};

use crate::format::{default_section_bounding_box, FormDocument, FormField, FormInput};
use crate::model::BoundingBox;

/// Diff options.
#[derive(Clone, Debug)]
pub struct DiffOptions {
    /// Collect item names for the detail section.
    pub detail: bool,
    pub max_items: usize,
    pub bbox_eps: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            detail: false,
            max_items: 20,
            bbox_eps: 1e-6,
        }
    }
}

type LabelKey<'a> = (&'a str, &'a str);

/// Compute a semantic diff between two form documents.
pub fn diff_documents(a: &FormDocument, b: &FormDocument, opts: &DiffOptions) -> DiffReport {
    let mut report = DiffReport {
        form_type: changed(&a.form_type, &b.form_type),
        page_number: changed(&a.page_number, &b.page_number),
        ..Default::default()
    };
    let mut detail = opts.detail.then(|| DiffDetail {
        max_items: opts.max_items,
        ..Default::default()
    });

    diff_sections(a, b, &mut report.sections, &mut detail, opts);

    let labels_a = fields_by_label(a);
    let labels_b = fields_by_label(b);
    let keys: BTreeSet<LabelKey> = labels_a.keys().chain(labels_b.keys()).copied().collect();

    for key in keys {
        let list_a = labels_a.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let list_b = labels_b.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        let path = format!("{} / {}", key.0, key.1);

        for (field_a, field_b) in list_a.iter().zip(list_b) {
            report.labels.shared += 1;
            if !bbox_eq_eps(&field_a.bounding_box, &field_b.bounding_box, opts.bbox_eps) {
                report.labels.modified += 1;
                if let Some(detail) = detail.as_mut() {
                    detail.push_modified(ModifiedItem {
                        path: path.clone(),
                        reason: "bbox changed".into(),
                    });
                }
            }
            diff_inputs(&path, field_a, field_b, &mut report.inputs, &mut detail, opts);
        }

        for field in list_a.iter().skip(list_b.len()) {
            report.labels.only_in_a += 1;
            report.inputs.only_in_a += field.inputs.len();
            if let Some(detail) = detail.as_mut() {
                detail.push_only_in_a(path.clone());
            }
        }
        for field in list_b.iter().skip(list_a.len()) {
            report.labels.only_in_b += 1;
            report.inputs.only_in_b += field.inputs.len();
            if let Some(detail) = detail.as_mut() {
                detail.push_only_in_b(path.clone());
            }
        }
    }

    report.detail = detail;
    report
}

fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<Changed<T>> {
    (a != b).then(|| Changed {
        a: a.clone(),
        b: b.clone(),
    })
}

/// Section name -> the box the section gets on import (first occurrence).
fn section_boxes(doc: &FormDocument) -> BTreeMap<&str, BoundingBox> {
    let mut map = BTreeMap::new();
    for field in &doc.fields {
        map.entry(field.section.trim()).or_insert_with(|| {
            field
                .section_bounding_box
                .unwrap_or_else(default_section_bounding_box)
        });
    }
    map
}

fn diff_sections(
    a: &FormDocument,
    b: &FormDocument,
    counts: &mut DiffCounts,
    detail: &mut Option<DiffDetail>,
    opts: &DiffOptions,
) {
    let sections_a = section_boxes(a);
    let sections_b = section_boxes(b);

    for (name, box_a) in &sections_a {
        match sections_b.get(name) {
            Some(box_b) => {
                counts.shared += 1;
                if !bbox_eq_eps(box_a, box_b, opts.bbox_eps) {
                    counts.modified += 1;
                    if let Some(detail) = detail.as_mut() {
                        detail.push_modified(ModifiedItem {
                            path: name.to_string(),
                            reason: "bbox changed".into(),
                        });
                    }
                }
            }
            None => {
                counts.only_in_a += 1;
                if let Some(detail) = detail.as_mut() {
                    detail.push_only_in_a(name.to_string());
                }
            }
        }
    }

    for name in sections_b.keys().filter(|n| !sections_a.contains_key(*n)) {
        counts.only_in_b += 1;
        if let Some(detail) = detail.as_mut() {
            detail.push_only_in_b(name.to_string());
        }
    }
}

fn fields_by_label(doc: &FormDocument) -> BTreeMap<LabelKey<'_>, Vec<&FormField>> {
    let mut map: BTreeMap<LabelKey, Vec<&FormField>> = BTreeMap::new();
    for field in &doc.fields {
        map.entry((field.section.trim(), field.label.trim()))
            .or_default()
            .push(field);
    }
    map
}

fn inputs_by_name(field: &FormField) -> BTreeMap<&str, Vec<&FormInput>> {
    let mut map: BTreeMap<&str, Vec<&FormInput>> = BTreeMap::new();
    for input in &field.inputs {
        map.entry(input.name.trim()).or_default().push(input);
    }
    map
}

fn diff_inputs(
    label_path: &str,
    field_a: &FormField,
    field_b: &FormField,
    counts: &mut DiffCounts,
    detail: &mut Option<DiffDetail>,
    opts: &DiffOptions,
) {
    let inputs_a = inputs_by_name(field_a);
    let inputs_b = inputs_by_name(field_b);
    let names: BTreeSet<&str> = inputs_a.keys().chain(inputs_b.keys()).copied().collect();

    for name in names {
        let list_a = inputs_a.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let list_b = inputs_b.get(name).map(Vec::as_slice).unwrap_or(&[]);
        let path = format!("{} / {}", label_path, name);

        for (input_a, input_b) in list_a.iter().zip(list_b) {
            counts.shared += 1;
            let reasons = input_changes(input_a, input_b, opts.bbox_eps);
            if !reasons.is_empty() {
                counts.modified += 1;
                if let Some(detail) = detail.as_mut() {
                    detail.push_modified(ModifiedItem {
                        path: path.clone(),
                        reason: reasons.join(", "),
                    });
                }
            }
        }

        let extra_a = list_a.len().saturating_sub(list_b.len());
        let extra_b = list_b.len().saturating_sub(list_a.len());
        counts.only_in_a += extra_a;
        counts.only_in_b += extra_b;
        if let Some(detail) = detail.as_mut() {
            for _ in 0..extra_a {
                detail.push_only_in_a(path.clone());
            }
            for _ in 0..extra_b {
                detail.push_only_in_b(path.clone());
            }
        }
    }
}

fn input_changes(a: &FormInput, b: &FormInput, eps: f64) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if a.input_type != b.input_type {
        reasons.push("type changed");
    }
    if a.lang != b.lang {
        reasons.push("lang changed");
    }
    if a.value != b.value {
        reasons.push("value changed");
    }
    if !bbox_eq_eps(&a.position, &b.position, eps) {
        reasons.push("position changed");
    }
    reasons
}

fn bbox_eq_eps(a: &BoundingBox, b: &BoundingBox, eps: f64) -> bool {
    (a.x0() - b.x0()).abs() <= eps
        && (a.y0() - b.y0()).abs() <= eps
        && (a.x1() - b.x1()).abs() <= eps
        && (a.y1() - b.y1()).abs() <= eps
}
