//! Store -> document conversion.

use tracing::info;

use super::document::{FormDocument, FormField, FormInput};
use crate::model::{BoundingBox, Entity};
use crate::store::AnnotationStore;

/// Document-level metadata that the store itself does not carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub form_type: String,
    /// 1-based page number; 0 is written as 1.
    pub page_number: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            form_type: String::new(),
            page_number: 1,
        }
    }
}

impl ExportOptions {
    pub fn new(form_type: impl Into<String>, page_number: u32) -> Self {
        Self {
            form_type: form_type.into(),
            page_number,
        }
    }
}

/// Exports the store as a form document.
///
/// Emits one field per label (sections first, labels in creation order
/// within each section). A label without inputs still produces a field,
/// with an empty `inputs` list; a section without labels produces none.
/// The overall box is the union of every rectangle in the store, or
/// `[[0, 0], [0, 0]]` when the store is empty.
pub fn export_store(store: &AnnotationStore, opts: &ExportOptions) -> FormDocument {
    let overall = BoundingBox::union_all(store.entities().map(Entity::geometry)).unwrap_or_default();

    let mut fields = Vec::with_capacity(store.counts().labels);
    for section in store.sections() {
        for label in store.labels_of(section.id) {
            let inputs = store
                .inputs_of(label.id)
                .map(|input| FormInput {
                    name: input.name.clone(),
                    input_type: input.input_type.clone(),
                    lang: input.lang.clone(),
                    position: input.position,
                    value: input.value.clone(),
                })
                .collect();

            fields.push(FormField {
                section: section.name.clone(),
                section_bounding_box: Some(section.bounding_box),
                label: label.text.clone(),
                bounding_box: label.bounding_box,
                inputs,
            });
        }
    }

    info!(
        form_type = %opts.form_type,
        fields = fields.len(),
        "exported form document"
    );

    FormDocument {
        form_type: opts.form_type.clone(),
        page_number: opts.page_number.max(1),
        bounding_box: overall,
        fields,
    }
}
