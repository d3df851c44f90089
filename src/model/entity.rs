//! Sections, labels and inputs: the three tiers of a form layout.
//!
//! Entities are normalized: children point at their parent by ID and
//! parents hold no list of children. The store keeps the reverse index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bbox::BoundingBox;
use super::ids::EntityId;
use super::vocab::DEFAULT_INPUT_TYPE;

/// Which tier of the hierarchy an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Section,
    Label,
    Input,
}

impl EntityKind {
    /// Lowercase code, as used in UI mode names and event scripts.
    pub fn code(&self) -> &'static str {
        match self {
            EntityKind::Section => "section",
            EntityKind::Label => "label",
            EntityKind::Input => "input",
        }
    }

    /// The kind a parent of this kind must have, if any.
    pub fn parent_kind(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Section => None,
            EntityKind::Label => Some(EntityKind::Section),
            EntityKind::Input => Some(EntityKind::Label),
        }
    }

    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Section, EntityKind::Label, EntityKind::Input]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Section => "Section",
            EntityKind::Label => "Label",
            EntityKind::Input => "Input",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "section" => Ok(EntityKind::Section),
            "label" => Ok(EntityKind::Label),
            "input" => Ok(EntityKind::Input),
            other => Err(format!(
                "unknown entity kind '{}' (expected section, label or input)",
                other
            )),
        }
    }
}

/// Top-level region grouping one or more labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: EntityId,
    pub name: String,
    pub bounding_box: BoundingBox,
}

/// A named field region belonging to exactly one section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: EntityId,
    pub parent_section_id: EntityId,
    pub text: String,
    pub bounding_box: BoundingBox,
}

/// Leaf data-entry region belonging to exactly one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub id: EntityId,
    pub parent_label_id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub lang: Option<String>,
    pub value: Option<String>,
    pub position: BoundingBox,
}

/// The user-supplied attributes of an input, before it gets an ID.
///
/// Optional text fields are normalized by the store: blank `input_type`
/// becomes `"text"`, and blank `lang`/`value` become `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewInput {
    pub name: String,
    pub input_type: Option<String>,
    pub lang: Option<String>,
    pub value: Option<String>,
}

impl NewInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the input type code.
    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Sets the language tag.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the prefilled value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Trims `s` and maps blank strings to `None`.
pub(crate) fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalizes an optional input type, falling back to the default.
pub(crate) fn input_type_or_default(s: Option<&str>) -> String {
    non_blank(s).unwrap_or_else(|| DEFAULT_INPUT_TYPE.to_string())
}

/// Any one entity in the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Section(Section),
    Label(Label),
    Input(Input),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Section(s) => s.id,
            Entity::Label(l) => l.id,
            Entity::Input(i) => i.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Section(_) => EntityKind::Section,
            Entity::Label(_) => EntityKind::Label,
            Entity::Input(_) => EntityKind::Input,
        }
    }

    /// The parent ID, or `None` for sections.
    pub fn parent_id(&self) -> Option<EntityId> {
        match self {
            Entity::Section(_) => None,
            Entity::Label(l) => Some(l.parent_section_id),
            Entity::Input(i) => Some(i.parent_label_id),
        }
    }

    /// The entity's rectangle: `bounding_box` for sections and labels,
    /// `position` for inputs.
    pub fn geometry(&self) -> &BoundingBox {
        match self {
            Entity::Section(s) => &s.bounding_box,
            Entity::Label(l) => &l.bounding_box,
            Entity::Input(i) => &i.position,
        }
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut BoundingBox {
        match self {
            Entity::Section(s) => &mut s.bounding_box,
            Entity::Label(l) => &mut l.bounding_box,
            Entity::Input(i) => &mut i.position,
        }
    }

    /// The entity's human-readable text: section name, label text or input
    /// name.
    pub fn display_name(&self) -> &str {
        match self {
            Entity::Section(s) => &s.name,
            Entity::Label(l) => &l.text,
            Entity::Input(i) => &i.name,
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Entity::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Entity::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&Input> {
        match self {
            Entity::Input(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> Entity {
        Entity::Input(Input {
            id: EntityId(3),
            parent_label_id: EntityId(2),
            name: "fullName".into(),
            input_type: "name".into(),
            lang: Some("en".into()),
            value: None,
            position: BoundingBox::from_xyxy(20.0, 65.0, 180.0, 85.0),
        })
    }

    #[test]
    fn test_entity_accessors() {
        let entity = sample_input();
        assert_eq!(entity.id(), EntityId(3));
        assert_eq!(entity.kind(), EntityKind::Input);
        assert_eq!(entity.parent_id(), Some(EntityId(2)));
        assert_eq!(entity.display_name(), "fullName");
        assert_eq!(
            *entity.geometry(),
            BoundingBox::from_xyxy(20.0, 65.0, 180.0, 85.0)
        );
        assert!(entity.as_input().is_some());
        assert!(entity.as_label().is_none());
    }

    #[test]
    fn test_kind_parsing_and_parents() {
        assert_eq!("Label".parse::<EntityKind>(), Ok(EntityKind::Label));
        assert!("checkbox".parse::<EntityKind>().is_err());
        assert_eq!(EntityKind::Input.parent_kind(), Some(EntityKind::Label));
        assert_eq!(EntityKind::Section.parent_kind(), None);
        assert_eq!(EntityKind::Section.to_string(), "Section");
    }

    #[test]
    fn test_text_normalization() {
        assert_eq!(non_blank(Some("  en ")), Some("en".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(input_type_or_default(Some("")), "text");
        assert_eq!(input_type_or_default(Some("date")), "date");
    }

    #[test]
    fn test_new_input_builder() {
        let input = NewInput::new("dob").with_type("date").with_lang("ar");
        assert_eq!(input.name, "dob");
        assert_eq!(input.input_type.as_deref(), Some("date"));
        assert_eq!(input.lang.as_deref(), Some("ar"));
        assert_eq!(input.value, None);
    }
}
