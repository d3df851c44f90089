//! Partial updates for existing entities.

use crate::model::{BoundingBox, EntityId, EntityKind};

/// A set of field changes to apply to one entity.
///
/// Unset fields are left unchanged. Fields that do not exist on the target
/// entity's kind are ignored, so one patch type serves all three kinds:
///
/// | field          | Section | Label | Input |
/// |----------------|---------|-------|-------|
/// | `name`         | yes     |       | yes   |
/// | `text`         |         | yes   |       |
/// | `parent`       |         | yes   | yes   |
/// | `input_type`   |         |       | yes   |
/// | `lang`         |         |       | yes   |
/// | `value`        |         |       | yes   |
/// | `bounding_box` | yes     | yes   | yes   |
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub parent: Option<EntityId>,
    pub input_type: Option<String>,
    /// `Some(None)` clears the language tag.
    pub lang: Option<Option<String>>,
    /// `Some(None)` clears the value.
    pub value: Option<Option<String>>,
    /// Replacement rectangle (`position` for inputs).
    pub bounding_box: Option<BoundingBox>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn lang(mut self, lang: Option<String>) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn value(mut self, value: Option<String>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Returns true if no field applicable to `kind` is set.
    pub fn is_empty_for(&self, kind: EntityKind) -> bool {
        if self.bounding_box.is_some() {
            return false;
        }
        match kind {
            EntityKind::Section => self.name.is_none(),
            EntityKind::Label => self.text.is_none() && self.parent.is_none(),
            EntityKind::Input => {
                self.name.is_none()
                    && self.parent.is_none()
                    && self.input_type.is_none()
                    && self.lang.is_none()
                    && self.value.is_none()
            }
        }
    }
}
