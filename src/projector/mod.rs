//! Hierarchy projection: store + session state -> UI view models.
//!
//! Projection is a pure function. It never fails: a parent reference that
//! cannot be resolved is shown as `Unknown` instead of raising an error.

mod view;

pub use view::{DropdownOption, HierarchyView, ListRow};

use crate::model::vocab::{input_type_display, lang_display};
use crate::model::{Entity, EntityId, Input, Label};
use crate::session::SessionState;
use crate::store::AnnotationStore;

const UNKNOWN_PARENT: &str = "Unknown";

/// Builds the list rows, dropdown options and highlight state.
pub fn project(store: &AnnotationStore, state: &SessionState) -> HierarchyView {
    let editing = state.editing_id();
    let selected = state.selected_id();

    let rows = store
        .entities()
        .map(|entity| ListRow {
            id: entity.id(),
            kind: entity.kind(),
            title: row_title(store, entity),
            bounding_box: *entity.geometry(),
            coords: entity.geometry().to_string(),
            selected: selected == Some(entity.id()),
            editing: editing == Some(entity.id()),
        })
        .collect();

    HierarchyView {
        rows,
        section_options: section_options(store),
        label_options: label_options(store),
        editing,
        selected,
        pending: state.pending_geometry(),
    }
}

/// Parent-section choices for label creation, in creation order.
pub fn section_options(store: &AnnotationStore) -> Vec<DropdownOption> {
    store
        .sections()
        .map(|s| DropdownOption {
            id: s.id,
            text: s.name.clone(),
        })
        .collect()
}

/// Parent-label choices for input creation, in creation order.
pub fn label_options(store: &AnnotationStore) -> Vec<DropdownOption> {
    store
        .labels()
        .map(|l| DropdownOption {
            id: l.id,
            text: l.text.clone(),
        })
        .collect()
}

/// The human label for one list row.
pub fn row_title(store: &AnnotationStore, entity: &Entity) -> String {
    match entity {
        Entity::Section(section) => section.name.clone(),
        Entity::Label(label) => label_title(store, label),
        Entity::Input(input) => input_title(store, input),
    }
}

fn label_title(store: &AnnotationStore, label: &Label) -> String {
    let section = parent_text(store, label.parent_section_id);
    format!("{} ({})", label.text, section)
}

fn input_title(store: &AnnotationStore, input: &Input) -> String {
    let mut kind = input_type_display(&input.input_type).to_string();
    if let Some(lang) = &input.lang {
        kind.push_str(", ");
        kind.push_str(lang_display(lang));
    }
    let label = parent_text(store, input.parent_label_id);
    format!("{} ({}) - ({})", input.name, kind, label)
}

fn parent_text(store: &AnnotationStore, parent: EntityId) -> &str {
    store
        .find_by_id(parent)
        .map(Entity::display_name)
        .unwrap_or(UNKNOWN_PARENT)
}
