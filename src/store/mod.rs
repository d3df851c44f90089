//! The annotation store: owner of every section, label and input.
//!
//! All entities live in one map keyed by [`EntityId`]. Per-kind ordered ID
//! sets give insertion order (IDs are monotonic), and an explicit
//! parent-to-children index drives cascading deletes.
//!
//! Every mutating operation validates its arguments completely before it
//! touches any collection, so a failed call leaves the store unchanged.
//! Rectangles are stored with ordered corners whichever way they were drawn.

mod patch;

pub use patch::EntityPatch;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::error::FormtagError;
use crate::model::{
    input_type_or_default, non_blank, BoundingBox, Entity, EntityId, EntityKind, IdGenerator,
    Input, Label, NewInput, Section,
};

/// Number of entities of each kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub sections: usize,
    pub labels: usize,
    pub inputs: usize,
}

impl StoreCounts {
    pub fn total(&self) -> usize {
        self.sections + self.labels + self.inputs
    }
}

/// Owns the three entity collections and enforces referential integrity.
#[derive(Clone, Debug, Default)]
pub struct AnnotationStore {
    entities: HashMap<EntityId, Entity>,
    sections: BTreeSet<EntityId>,
    labels: BTreeSet<EntityId>,
    inputs: BTreeSet<EntityId>,
    children: HashMap<EntityId, BTreeSet<EntityId>>,
    ids: IdGenerator,
}

impl AnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ----------------------------------------------------------------
    // Creation
    // ----------------------------------------------------------------

    /// Creates a section.
    ///
    /// # Errors
    /// [`FormtagError::Validation`] if `name` is blank.
    pub fn create_section(
        &mut self,
        name: &str,
        bounding_box: BoundingBox,
    ) -> Result<&Section, FormtagError> {
        let name = required(name, EntityKind::Section, "name")?;
        let id = self.ids.next_id();
        debug!(%id, %name, "created section");
        let entity = Entity::Section(Section {
            id,
            name,
            bounding_box: bounding_box.normalized(),
        });
        self.insert(entity);
        self.section(id).ok_or(FormtagError::NotFound(id))
    }

    /// Creates a label under an existing section.
    ///
    /// # Errors
    /// [`FormtagError::Validation`] if `text` is blank, and
    /// [`FormtagError::Reference`] if `parent_section_id` is not a live
    /// section.
    pub fn create_label(
        &mut self,
        parent_section_id: EntityId,
        text: &str,
        bounding_box: BoundingBox,
    ) -> Result<&Label, FormtagError> {
        let text = required(text, EntityKind::Label, "text")?;
        self.check_parent(EntityKind::Label, parent_section_id)?;
        let id = self.ids.next_id();
        debug!(%id, parent = %parent_section_id, %text, "created label");
        let entity = Entity::Label(Label {
            id,
            parent_section_id,
            text,
            bounding_box: bounding_box.normalized(),
        });
        self.insert(entity);
        self.label(id).ok_or(FormtagError::NotFound(id))
    }

    /// Creates an input under an existing label.
    ///
    /// The input type defaults to `"text"`; blank `lang` and `value` are
    /// stored as `None`.
    ///
    /// # Errors
    /// [`FormtagError::Validation`] if the name is blank, and
    /// [`FormtagError::Reference`] if `parent_label_id` is not a live label.
    pub fn create_input(
        &mut self,
        parent_label_id: EntityId,
        new_input: NewInput,
        position: BoundingBox,
    ) -> Result<&Input, FormtagError> {
        let name = required(&new_input.name, EntityKind::Input, "name")?;
        self.check_parent(EntityKind::Input, parent_label_id)?;
        let id = self.ids.next_id();
        debug!(%id, parent = %parent_label_id, %name, "created input");
        let entity = Entity::Input(Input {
            id,
            parent_label_id,
            name,
            input_type: input_type_or_default(new_input.input_type.as_deref()),
            lang: non_blank(new_input.lang.as_deref()),
            value: non_blank(new_input.value.as_deref()),
            position: position.normalized(),
        });
        self.insert(entity);
        self.input(id).ok_or(FormtagError::NotFound(id))
    }

    fn insert(&mut self, entity: Entity) {
        let id = entity.id();
        if let Some(parent) = entity.parent_id() {
            self.children.entry(parent).or_default().insert(id);
        }
        self.order_mut(entity.kind()).insert(id);
        self.entities.insert(id, entity);
    }

    // ----------------------------------------------------------------
    // Updates
    // ----------------------------------------------------------------

    /// Applies `patch` to the entity with the given ID.
    ///
    /// Only fields that exist on the entity's kind are applied. A changed
    /// parent must resolve to a live entity of the parent kind. Geometry in
    /// the patch is written only once every other field has been accepted.
    ///
    /// # Errors
    /// [`FormtagError::NotFound`] if no entity has this ID,
    /// [`FormtagError::Validation`] if the patch blanks a required field, and
    /// [`FormtagError::Reference`] if the new parent does not resolve.
    pub fn update_entity(
        &mut self,
        id: EntityId,
        patch: &EntityPatch,
    ) -> Result<&Entity, FormtagError> {
        let kind = self.kind_of(id).ok_or(FormtagError::NotFound(id))?;

        let name = match (kind, &patch.name) {
            (EntityKind::Section | EntityKind::Input, Some(name)) => {
                Some(required(name, kind, "name")?)
            }
            _ => None,
        };
        let text = match (kind, &patch.text) {
            (EntityKind::Label, Some(text)) => Some(required(text, kind, "text")?),
            _ => None,
        };
        let parent = match (kind, patch.parent) {
            (EntityKind::Label | EntityKind::Input, Some(parent)) => {
                self.check_parent(kind, parent)?;
                Some(parent)
            }
            _ => None,
        };

        let previous_parent = self.entities.get(&id).and_then(Entity::parent_id);
        if let (Some(old), Some(new)) = (previous_parent, parent) {
            if old != new {
                if let Some(siblings) = self.children.get_mut(&old) {
                    siblings.remove(&id);
                }
                self.children.entry(new).or_default().insert(id);
            }
        }

        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(FormtagError::NotFound(id))?;
        if let Some(bbox) = patch.bounding_box {
            *entity.geometry_mut() = bbox.normalized();
        }
        match entity {
            Entity::Section(section) => {
                if let Some(name) = name {
                    section.name = name;
                }
            }
            Entity::Label(label) => {
                if let Some(text) = text {
                    label.text = text;
                }
                if let Some(parent) = parent {
                    label.parent_section_id = parent;
                }
            }
            Entity::Input(input) => {
                if let Some(name) = name {
                    input.name = name;
                }
                if let Some(parent) = parent {
                    input.parent_label_id = parent;
                }
                if let Some(input_type) = &patch.input_type {
                    input.input_type = input_type_or_default(Some(input_type));
                }
                if let Some(lang) = &patch.lang {
                    input.lang = non_blank(lang.as_deref());
                }
                if let Some(value) = &patch.value {
                    input.value = non_blank(value.as_deref());
                }
            }
        }
        debug!(%id, %kind, "updated entity");
        Ok(entity)
    }

    /// Replaces the rectangle of a section, label or input.
    ///
    /// # Errors
    /// [`FormtagError::NotFound`] if no entity has this ID.
    pub fn update_bounding_box(
        &mut self,
        id: EntityId,
        bounding_box: BoundingBox,
    ) -> Result<(), FormtagError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(FormtagError::NotFound(id))?;
        let bounding_box = bounding_box.normalized();
        *entity.geometry_mut() = bounding_box;
        debug!(%id, bbox = %bounding_box, "replaced geometry");
        Ok(())
    }

    // ----------------------------------------------------------------
    // Deletion
    // ----------------------------------------------------------------

    /// Deletes an entity together with everything beneath it.
    ///
    /// Deleting a section removes its labels and their inputs; deleting a
    /// label removes its inputs. Returns the removed IDs, starting with `id`
    /// itself. Deleting an unknown ID is a no-op and returns an empty list.
    pub fn delete_entity(&mut self, id: EntityId) -> Vec<EntityId> {
        let Some(parent) = self.entities.get(&id).map(Entity::parent_id) else {
            return Vec::new();
        };
        if let Some(siblings) = parent.and_then(|p| self.children.get_mut(&p)) {
            siblings.remove(&id);
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(kids) = self.children.remove(&next) {
                pending.extend(kids.into_iter().rev());
            }
            if let Some(entity) = self.entities.remove(&next) {
                self.order_mut(entity.kind()).remove(&next);
                removed.push(next);
            }
        }
        debug!(%id, removed = removed.len(), "deleted entity");
        removed
    }

    /// Removes every entity. IDs handed out before the clear are not reused.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.sections.clear();
        self.labels.clear();
        self.inputs.clear();
        self.children.clear();
        debug!("cleared store");
    }

    /// An empty store whose IDs continue after the ones this store issued.
    ///
    /// Used to rebuild a store off to the side (e.g. during import) without
    /// ever handing out an ID the replaced store already used.
    pub fn successor(&self) -> AnnotationStore {
        AnnotationStore {
            ids: self.ids.clone(),
            ..AnnotationStore::default()
        }
    }

    // ----------------------------------------------------------------
    // Lookup
    // ----------------------------------------------------------------

    /// Looks up any entity by ID.
    pub fn find_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).map(Entity::kind)
    }

    pub fn section(&self, id: EntityId) -> Option<&Section> {
        self.entities.get(&id).and_then(Entity::as_section)
    }

    pub fn label(&self, id: EntityId) -> Option<&Label> {
        self.entities.get(&id).and_then(Entity::as_label)
    }

    pub fn input(&self, id: EntityId) -> Option<&Input> {
        self.entities.get(&id).and_then(Entity::as_input)
    }

    /// All sections in creation order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.iter().filter_map(|id| self.section(*id))
    }

    /// All labels in creation order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.labels.iter().filter_map(|id| self.label(*id))
    }

    /// All inputs in creation order.
    pub fn inputs(&self) -> impl Iterator<Item = &Input> + '_ {
        self.inputs.iter().filter_map(|id| self.input(*id))
    }

    /// Every entity: sections first, then labels, then inputs.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.sections
            .iter()
            .chain(self.labels.iter())
            .chain(self.inputs.iter())
            .filter_map(|id| self.entities.get(id))
    }

    /// Labels of one section, in creation order.
    pub fn labels_of(&self, section_id: EntityId) -> impl Iterator<Item = &Label> + '_ {
        self.child_ids(section_id).filter_map(|id| self.label(id))
    }

    /// Inputs of one label, in creation order.
    pub fn inputs_of(&self, label_id: EntityId) -> impl Iterator<Item = &Input> + '_ {
        self.child_ids(label_id).filter_map(|id| self.input(id))
    }

    /// IDs recorded in the child index under `parent`.
    pub fn child_ids(&self, parent: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.children
            .get(&parent)
            .into_iter()
            .flat_map(|kids| kids.iter().copied())
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            sections: self.sections.len(),
            labels: self.labels.len(),
            inputs: self.inputs.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ----------------------------------------------------------------
    // Helpers
    // ----------------------------------------------------------------

    fn order_mut(&mut self, kind: EntityKind) -> &mut BTreeSet<EntityId> {
        match kind {
            EntityKind::Section => &mut self.sections,
            EntityKind::Label => &mut self.labels,
            EntityKind::Input => &mut self.inputs,
        }
    }

    /// Checks that `parent` is a live entity of the kind `child_kind` hangs
    /// under.
    fn check_parent(&self, child_kind: EntityKind, parent: EntityId) -> Result<(), FormtagError> {
        let expected = child_kind.parent_kind();
        if expected.is_some() && self.kind_of(parent) == expected {
            Ok(())
        } else {
            Err(FormtagError::Reference {
                kind: child_kind,
                parent,
            })
        }
    }
}

/// Trims a required text field, rejecting blanks.
fn required(value: &str, kind: EntityKind, field: &'static str) -> Result<String, FormtagError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormtagError::Validation { kind, field })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox {
        BoundingBox::from_xyxy(x0, y0, x1, y1)
    }

    /// Two sections; the first has two labels with inputs, the second one
    /// label without inputs.
    fn sample_store() -> (AnnotationStore, [EntityId; 7]) {
        let mut store = AnnotationStore::new();
        let s1 = store
            .create_section("Personal Info", bbox(10.0, 10.0, 200.0, 50.0))
            .unwrap()
            .id;
        let s2 = store
            .create_section("Employer", bbox(10.0, 300.0, 200.0, 400.0))
            .unwrap()
            .id;
        let l1 = store
            .create_label(s1, "Full Name", bbox(15.0, 60.0, 190.0, 90.0))
            .unwrap()
            .id;
        let l2 = store
            .create_label(s1, "Birth Date", bbox(15.0, 100.0, 190.0, 130.0))
            .unwrap()
            .id;
        let l3 = store
            .create_label(s2, "Company", bbox(15.0, 310.0, 190.0, 340.0))
            .unwrap()
            .id;
        let i1 = store
            .create_input(
                l1,
                NewInput::new("fullName").with_type("name").with_lang("en"),
                bbox(20.0, 65.0, 180.0, 85.0),
            )
            .unwrap()
            .id;
        let i2 = store
            .create_input(
                l2,
                NewInput::new("dob").with_type("date"),
                bbox(20.0, 105.0, 180.0, 125.0),
            )
            .unwrap()
            .id;
        (store, [s1, s2, l1, l2, l3, i1, i2])
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let (store, ids) = sample_store();
        let unique: BTreeSet<EntityId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(store.len(), 7);
        assert_eq!(
            store.counts(),
            StoreCounts {
                sections: 2,
                labels: 3,
                inputs: 2
            }
        );
    }

    #[test]
    fn test_create_section_rejects_blank_name() {
        let mut store = AnnotationStore::new();
        let err = store
            .create_section("   ", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap_err();
        assert!(matches!(
            err,
            FormtagError::Validation {
                kind: EntityKind::Section,
                field: "name"
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_trims_text() {
        let mut store = AnnotationStore::new();
        let section = store
            .create_section("  Contact  ", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap();
        assert_eq!(section.name, "Contact");
    }

    #[test]
    fn test_create_label_with_unknown_parent_fails() {
        let (mut store, _) = sample_store();
        let before = store.counts();
        let err = store
            .create_label(EntityId(999), "Orphan", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap_err();
        assert!(matches!(err, FormtagError::Reference { .. }));
        assert_eq!(store.counts(), before);
    }

    #[test]
    fn test_create_label_under_label_fails() {
        let (mut store, [_, _, l1, ..]) = sample_store();
        let err = store
            .create_label(l1, "Nested", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap_err();
        assert!(matches!(
            err,
            FormtagError::Reference {
                kind: EntityKind::Label,
                ..
            }
        ));
    }

    #[test]
    fn test_create_input_rejects_blank_name_before_parent() {
        let mut store = AnnotationStore::new();
        let err = store
            .create_input(EntityId(1), NewInput::new(""), bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap_err();
        assert!(matches!(err, FormtagError::Validation { .. }));
    }

    #[test]
    fn test_create_input_defaults() {
        let (mut store, [_, _, l1, ..]) = sample_store();
        let input = store
            .create_input(
                l1,
                NewInput::new("middle").with_lang("").with_value("  "),
                bbox(0.0, 0.0, 20.0, 20.0),
            )
            .unwrap();
        assert_eq!(input.input_type, "text");
        assert_eq!(input.lang, None);
        assert_eq!(input.value, None);
    }

    #[test]
    fn test_update_section_name() {
        let (mut store, [s1, ..]) = sample_store();
        store
            .update_entity(s1, &EntityPatch::new().name("Applicant"))
            .unwrap();
        assert_eq!(store.section(s1).unwrap().name, "Applicant");
    }

    #[test]
    fn test_update_ignores_fields_of_other_kinds() {
        let (mut store, [s1, ..]) = sample_store();
        store
            .update_entity(s1, &EntityPatch::new().text("ignored").input_type("date"))
            .unwrap();
        assert_eq!(store.section(s1).unwrap().name, "Personal Info");
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let (mut store, [_, _, l1, ..]) = sample_store();
        let err = store
            .update_entity(l1, &EntityPatch::new().text(" "))
            .unwrap_err();
        assert!(matches!(err, FormtagError::Validation { .. }));
        assert_eq!(store.label(l1).unwrap().text, "Full Name");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (mut store, _) = sample_store();
        let err = store
            .update_entity(EntityId(999), &EntityPatch::new().name("x"))
            .unwrap_err();
        assert!(matches!(err, FormtagError::NotFound(EntityId(999))));
        assert!(matches!(
            store.update_bounding_box(EntityId(999), bbox(0.0, 0.0, 1.0, 1.0)),
            Err(FormtagError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_reparents_label() {
        let (mut store, [s1, s2, l1, ..]) = sample_store();
        store
            .update_entity(l1, &EntityPatch::new().parent(s2))
            .unwrap();

        assert_eq!(store.label(l1).unwrap().parent_section_id, s2);
        assert!(store.labels_of(s1).all(|l| l.id != l1));
        assert!(store.labels_of(s2).any(|l| l.id == l1));

        // Deleting the new parent now takes the label and its input along.
        let removed = store.delete_entity(s2);
        assert!(removed.contains(&l1));
        assert_eq!(store.counts().inputs, 1);
    }

    #[test]
    fn test_update_rejects_wrong_parent_kind() {
        let (mut store, [s1, _, _, _, _, i1, _]) = sample_store();
        let err = store
            .update_entity(i1, &EntityPatch::new().parent(s1).name("renamed"))
            .unwrap_err();
        assert!(matches!(err, FormtagError::Reference { .. }));
        // Nothing from the rejected patch was applied.
        assert_eq!(store.input(i1).unwrap().name, "fullName");
    }

    #[test]
    fn test_update_input_optional_fields() {
        let (mut store, [.., i1, _]) = sample_store();
        store
            .update_entity(
                i1,
                &EntityPatch::new()
                    .lang(None)
                    .value(Some("Jane Doe".into()))
                    .input_type(""),
            )
            .unwrap();
        let input = store.input(i1).unwrap();
        assert_eq!(input.lang, None);
        assert_eq!(input.value.as_deref(), Some("Jane Doe"));
        assert_eq!(input.input_type, "text");
    }

    #[test]
    fn test_update_bounding_box_targets_geometry_field() {
        let (mut store, [_, _, l1, _, _, i1, _]) = sample_store();
        let new_box = bbox(1.0, 2.0, 30.0, 40.0);
        store.update_bounding_box(l1, new_box).unwrap();
        store.update_bounding_box(i1, new_box).unwrap();
        assert_eq!(store.label(l1).unwrap().bounding_box, new_box);
        assert_eq!(store.input(i1).unwrap().position, new_box);
    }

    #[test]
    fn test_inverted_boxes_are_stored_ordered() {
        let mut store = AnnotationStore::new();
        let s = store
            .create_section("Totals", bbox(200.0, 200.0, 10.0, 10.0))
            .unwrap()
            .id;
        let l = store
            .create_label(s, "Sum", bbox(190.0, 20.0, 20.0, 60.0))
            .unwrap()
            .id;
        let i = store
            .create_input(l, NewInput::new("sum"), bbox(30.0, 55.0, 180.0, 25.0))
            .unwrap()
            .id;

        assert_eq!(store.section(s).unwrap().bounding_box, bbox(10.0, 10.0, 200.0, 200.0));
        assert_eq!(store.label(l).unwrap().bounding_box, bbox(20.0, 20.0, 190.0, 60.0));
        assert_eq!(store.input(i).unwrap().position, bbox(30.0, 25.0, 180.0, 55.0));

        store.update_bounding_box(l, bbox(50.0, 50.0, 0.0, 0.0)).unwrap();
        assert_eq!(store.label(l).unwrap().bounding_box, bbox(0.0, 0.0, 50.0, 50.0));
        assert!(store.entities().all(|e| e.geometry().is_ordered()));
    }

    #[test]
    fn test_patch_geometry_is_not_applied_when_parent_is_rejected() {
        let (mut store, [.., l1, _, _, _, _]) = sample_store();
        let before = store.label(l1).unwrap().clone();
        let patch = EntityPatch::new()
            .text("New")
            .parent(EntityId(99))
            .bounding_box(bbox(0.0, 0.0, 500.0, 500.0));

        let err = store.update_entity(l1, &patch).unwrap_err();
        assert!(matches!(err, FormtagError::Reference { .. }));
        assert_eq!(store.label(l1).unwrap(), &before);

        store
            .update_entity(l1, &EntityPatch::new().bounding_box(bbox(9.0, 9.0, 1.0, 1.0)))
            .unwrap();
        assert_eq!(store.label(l1).unwrap().bounding_box, bbox(1.0, 1.0, 9.0, 9.0));
    }

    #[test]
    fn test_delete_section_cascades() {
        let (mut store, [s1, s2, l1, l2, l3, i1, i2]) = sample_store();
        let removed: BTreeSet<EntityId> = store.delete_entity(s1).into_iter().collect();

        assert_eq!(
            removed,
            [s1, l1, l2, i1, i2].into_iter().collect::<BTreeSet<_>>()
        );
        assert!(store.contains(s2));
        assert!(store.contains(l3));
        assert_eq!(
            store.counts(),
            StoreCounts {
                sections: 1,
                labels: 1,
                inputs: 0
            }
        );
    }

    #[test]
    fn test_delete_label_cascades_to_inputs_only() {
        let (mut store, [s1, _, l1, l2, _, i1, i2]) = sample_store();
        let removed = store.delete_entity(l1);
        assert_eq!(removed, vec![l1, i1]);
        assert!(store.contains(s1));
        assert!(store.contains(l2));
        assert!(store.contains(i2));
    }

    #[test]
    fn test_delete_input_has_no_cascade() {
        let (mut store, [.., i1, _]) = sample_store();
        assert_eq!(store.delete_entity(i1), vec![i1]);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (mut store, [s1, ..]) = sample_store();
        store.delete_entity(s1);
        let len = store.len();
        assert!(store.delete_entity(s1).is_empty());
        assert!(store.delete_entity(EntityId(999)).is_empty());
        assert_eq!(store.len(), len);
    }

    #[test]
    fn test_iteration_order_is_creation_order() {
        let (store, [s1, s2, l1, l2, l3, i1, i2]) = sample_store();
        let order: Vec<EntityId> = store.entities().map(Entity::id).collect();
        assert_eq!(order, vec![s1, s2, l1, l2, l3, i1, i2]);
        let labels: Vec<EntityId> = store.labels_of(s1).map(|l| l.id).collect();
        assert_eq!(labels, vec![l1, l2]);
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let (mut store, ids) = sample_store();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.counts().total(), 0);

        let fresh = store
            .create_section("Again", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap()
            .id;
        assert!(ids.iter().all(|id| *id < fresh));
    }

    #[test]
    fn test_successor_is_empty_and_continues_ids() {
        let (store, ids) = sample_store();
        let mut next = store.successor();
        assert!(next.is_empty());
        let fresh = next
            .create_section("Next", bbox(0.0, 0.0, 20.0, 20.0))
            .unwrap()
            .id;
        assert!(ids.iter().all(|id| *id < fresh));
        // The original is untouched.
        assert_eq!(store.len(), ids.len());
    }
}
