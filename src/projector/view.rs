//! View-model types handed to the UI layer, plus a plain-text rendering.

use serde::Serialize;
use std::fmt;

use crate::model::{BoundingBox, EntityId, EntityKind};

/// Everything the UI needs to redraw the annotation list and form controls.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HierarchyView {
    /// One row per entity: sections, then labels, then inputs.
    pub rows: Vec<ListRow>,
    /// Choices for a new label's parent section.
    pub section_options: Vec<DropdownOption>,
    /// Choices for a new input's parent label.
    pub label_options: Vec<DropdownOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<EntityId>,
    /// Replacement geometry drawn during the current edit, not yet committed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<BoundingBox>,
}

/// One line of the annotation list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListRow {
    pub id: EntityId,
    pub kind: EntityKind,
    pub title: String,
    pub bounding_box: BoundingBox,
    /// The rounded corner caption shown under the title.
    pub coords: String,
    pub selected: bool,
    pub editing: bool,
}

/// A `<select>`-style option: the entity ID and the text to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub id: EntityId,
    pub text: String,
}

impl HierarchyView {
    pub fn row(&self, id: EntityId) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for HierarchyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No annotations");
        }

        let count = |kind: EntityKind| self.rows.iter().filter(|r| r.kind == kind).count();
        writeln!(
            f,
            "{} section(s), {} label(s), {} input(s)",
            count(EntityKind::Section),
            count(EntityKind::Label),
            count(EntityKind::Input)
        )?;
        writeln!(f)?;

        let title_width = self
            .rows
            .iter()
            .map(|r| r.title.chars().count())
            .max()
            .unwrap_or(0);

        for row in &self.rows {
            let marker = if row.editing {
                "  (editing)"
            } else if row.selected {
                "  (selected)"
            } else {
                ""
            };
            writeln!(
                f,
                "  {:<7} #{:<4} {:<width$}  {}{}",
                row.kind.to_string(),
                row.id.as_u64(),
                row.title,
                row.coords,
                marker,
                width = title_width
            )?;
        }

        Ok(())
    }
}
