//! UI events and form values, as delivered by the drawing surface.
//!
//! Events are serde-tagged so that a recorded JSON event script can drive a
//! session without any UI:
//!
//! ```json
//! [
//!   { "event": "mode_changed", "kind": "section" },
//!   { "event": "bbox_drawn", "bbox": [[10, 10], [200, 50]],
//!     "form": { "section_name": "Personal Info" } },
//!   { "event": "select_requested", "id": 1 }
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FormtagError;
use crate::model::{BoundingBox, EntityId, EntityKind};

/// The current contents of the annotation form controls.
///
/// Only the fields relevant to the entity kind being created or updated are
/// read; the rest are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub section_name: String,
    pub parent_section: Option<EntityId>,
    pub label_text: String,
    pub parent_label: Option<EntityId>,
    pub input_name: String,
    pub input_type: String,
    pub input_lang: String,
    pub input_value: String,
}

impl FormFields {
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            section_name: name.into(),
            ..Default::default()
        }
    }

    pub fn label(parent_section: EntityId, text: impl Into<String>) -> Self {
        Self {
            parent_section: Some(parent_section),
            label_text: text.into(),
            ..Default::default()
        }
    }

    pub fn input(parent_label: EntityId, name: impl Into<String>) -> Self {
        Self {
            parent_label: Some(parent_label),
            input_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_input_lang(mut self, lang: impl Into<String>) -> Self {
        self.input_lang = lang.into();
        self
    }

    pub fn with_input_value(mut self, value: impl Into<String>) -> Self {
        self.input_value = value.into();
        self
    }
}

/// One user intent, as reported by the UI layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// The user finished dragging a rectangle.
    BboxDrawn {
        bbox: BoundingBox,
        #[serde(default)]
        form: FormFields,
    },
    /// The draw mode switched to another entity kind.
    ModeChanged { kind: EntityKind },
    EditRequested { id: EntityId },
    DeleteRequested { id: EntityId },
    SelectRequested { id: EntityId },
    CancelEditRequested,
    ClearAllRequested,
    /// The "Update" button was pressed while editing.
    UpdateCommitted {
        #[serde(default)]
        form: FormFields,
    },
    /// The form type or page number inputs changed.
    FormMetaChanged { form_type: String, page_number: u32 },
}

/// Reads a JSON array of events from a file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid event
/// array.
pub fn read_event_script(path: &Path) -> Result<Vec<UiEvent>, FormtagError> {
    let file = File::open(path).map_err(FormtagError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| FormtagError::InvalidEventScript {
        path: path.to_path_buf(),
        source,
    })
}
