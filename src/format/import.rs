//! Document -> store conversion.

use std::collections::HashMap;

use tracing::info;

use super::document::{default_section_bounding_box, FormDocument};
use crate::error::FormtagError;
use crate::model::{EntityId, NewInput};
use crate::store::AnnotationStore;

/// Rebuilds a store from a form document.
///
/// Sections are matched by name: the first field naming a section creates
/// it (using that field's `sectionBoundingBox`, or `[[0, 0], [100, 100]]`
/// when absent) and later fields with the same name attach to it. Labels
/// are never merged: every field creates a new label, even when its text
/// repeats. Each listed input becomes a new input under that label.
///
/// Entity IDs are freshly generated.
///
/// # Errors
/// Propagates store validation errors, e.g. for a field with a blank
/// section name.
pub fn import_document(doc: &FormDocument) -> Result<AnnotationStore, FormtagError> {
    build(doc, AnnotationStore::new())
}

/// Replaces the contents of `target` with the entities of `doc`.
///
/// The new entities are built in a separate store whose IDs continue after
/// `target`'s, and swapped in only once the whole document has been
/// accepted. On error `target` is left exactly as it was.
pub fn import_into(target: &mut AnnotationStore, doc: &FormDocument) -> Result<(), FormtagError> {
    let store = build(doc, target.successor())?;
    *target = store;
    Ok(())
}

fn build(doc: &FormDocument, mut store: AnnotationStore) -> Result<AnnotationStore, FormtagError> {
    let mut sections_by_name: HashMap<&str, EntityId> = HashMap::new();

    for field in &doc.fields {
        let section_id = match sections_by_name.get(field.section.trim()) {
            Some(id) => *id,
            None => {
                let bbox = field
                    .section_bounding_box
                    .unwrap_or_else(default_section_bounding_box);
                let id = store.create_section(&field.section, bbox)?.id;
                sections_by_name.insert(field.section.trim(), id);
                id
            }
        };

        let label_id = store
            .create_label(section_id, &field.label, field.bounding_box)?
            .id;

        for input in &field.inputs {
            let new_input = NewInput {
                name: input.name.clone(),
                input_type: Some(input.input_type.clone()),
                lang: input.lang.clone(),
                value: input.value.clone(),
            };
            store.create_input(label_id, new_input, input.position)?;
        }
    }

    let counts = store.counts();
    info!(
        form_type = %doc.form_type,
        sections = counts.sections,
        labels = counts.labels,
        inputs = counts.inputs,
        "imported form document"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::io_json::from_json_str;
    use crate::model::BoundingBox;

    const TWO_FIELDS_SAME_SECTION: &str = r#"{
        "formType": "W2",
        "pageNumber": 1,
        "boundingBox": [[0, 0], [300, 300]],
        "fields": [
            {
                "section": "Personal Info",
                "sectionBoundingBox": [[10, 10], [200, 50]],
                "label": "Name",
                "boundingBox": [[15, 60], [190, 90]],
                "inputs": [
                    { "name": "first", "type": "name", "lang": "en", "position": [[20, 65], [90, 85]], "value": null },
                    { "name": "last", "position": [[100, 65], [180, 85]] }
                ]
            },
            {
                "section": "Personal Info",
                "sectionBoundingBox": [[0, 0], [1, 1]],
                "label": "Name",
                "boundingBox": [[15, 100], [190, 130]],
                "inputs": []
            },
            {
                "section": "Employer",
                "label": "Company",
                "boundingBox": [[15, 200], [190, 230]]
            }
        ]
    }"#;

    #[test]
    fn test_import_merges_sections_by_name() {
        let doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        let store = import_document(&doc).unwrap();

        let sections: Vec<_> = store.sections().collect();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "Personal Info");
        // First occurrence wins for the section geometry.
        assert_eq!(
            sections[0].bounding_box,
            BoundingBox::from_xyxy(10.0, 10.0, 200.0, 50.0)
        );
        assert_eq!(sections[1].bounding_box, default_section_bounding_box());
    }

    #[test]
    fn test_import_never_merges_labels() {
        let doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        let store = import_document(&doc).unwrap();

        let personal = store.sections().next().unwrap().id;
        let labels: Vec<_> = store.labels_of(personal).collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.iter().all(|l| l.text == "Name"));
        assert_ne!(labels[0].id, labels[1].id);
    }

    #[test]
    fn test_import_input_defaults() {
        let doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        let store = import_document(&doc).unwrap();

        let inputs: Vec<_> = store.inputs().collect();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].input_type, "name");
        assert_eq!(inputs[0].lang.as_deref(), Some("en"));
        assert_eq!(inputs[1].input_type, "text");
        assert_eq!(inputs[1].lang, None);
        assert_eq!(inputs[1].value, None);
    }

    #[test]
    fn test_import_orders_inverted_boxes() {
        let doc = from_json_str(
            r#"{
                "formType": "W2",
                "pageNumber": 1,
                "boundingBox": [[50, 50], [60, 60]],
                "fields": [{
                    "section": "Totals",
                    "sectionBoundingBox": [[200, 200], [10, 10]],
                    "label": "Sum",
                    "boundingBox": [[50, 50], [60, 60]],
                    "inputs": [{ "name": "sum", "position": [[58, 58], [52, 52]] }]
                }]
            }"#,
        )
        .unwrap();
        let store = import_document(&doc).unwrap();

        let section = store.sections().next().unwrap();
        assert_eq!(
            section.bounding_box,
            BoundingBox::from_xyxy(10.0, 10.0, 200.0, 200.0)
        );
        let input = store.inputs().next().unwrap();
        assert_eq!(input.position, BoundingBox::from_xyxy(52.0, 52.0, 58.0, 58.0));

        // The recomputed overall box now covers the section.
        let exported = crate::format::export_store(&store, &crate::format::ExportOptions::default());
        assert_eq!(
            exported.bounding_box,
            BoundingBox::from_xyxy(10.0, 10.0, 200.0, 200.0)
        );
    }

    #[test]
    fn test_import_rejects_blank_section_name() {
        let mut doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        doc.fields[2].section = "  ".into();
        let err = import_document(&doc).unwrap_err();
        assert!(matches!(err, FormtagError::Validation { .. }));
    }

    #[test]
    fn test_import_into_replaces_contents() {
        let mut store = AnnotationStore::new();
        let old = store
            .create_section("Old", BoundingBox::from_xyxy(0.0, 0.0, 50.0, 50.0))
            .unwrap()
            .id;

        let doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        import_into(&mut store, &doc).unwrap();

        assert!(!store.contains(old));
        assert_eq!(store.counts().sections, 2);
        assert!(store.entities().all(|e| e.id() > old));
    }

    #[test]
    fn test_failed_import_into_keeps_store() {
        let mut store = AnnotationStore::new();
        let old = store
            .create_section("Old", BoundingBox::from_xyxy(0.0, 0.0, 50.0, 50.0))
            .unwrap()
            .id;

        let mut doc = from_json_str(TWO_FIELDS_SAME_SECTION).unwrap();
        doc.fields[1].label = String::new();
        assert!(import_into(&mut store, &doc).is_err());

        assert_eq!(store.len(), 1);
        assert!(store.contains(old));
    }
}
