//! The edit session: mode, selection and edit state over one store.
//!
//! [`EditSession`] turns UI intents (a drawn rectangle, an edit or delete
//! request, a committed form) into store operations. It owns the store and
//! a [`SessionState`] value; every operation leaves both consistent, so the
//! state never refers to an entity the store no longer holds.
//!
//! Errors from the store are returned to the caller and also recorded as the
//! session's status message. They never leave the session half-updated.

mod event;
mod state;

pub use event::{read_event_script, FormFields, UiEvent};
pub use state::SessionState;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FormtagError;
use crate::format::{export_store, import_into, io_json, ExportOptions, FormDocument};
use crate::model::{BoundingBox, EntityId, EntityKind, NewInput};
use crate::projector::{project, HierarchyView};
use crate::store::{AnnotationStore, EntityPatch};

/// What a drawn rectangle turned into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrawOutcome {
    /// A new entity of the current mode's kind.
    Created { id: EntityId, kind: EntityKind },
    /// Replacement geometry for the entity being edited, applied on commit.
    GeometryPending { id: EntityId },
}

/// What pressing "Update" did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// Field values (and any pending geometry) were applied.
    Updated { id: EntityId },
    /// A required field was blank: field values were left alone, but any
    /// pending geometry was still applied.
    FieldsSkipped { id: EntityId },
    /// No edit was in progress.
    NotEditing,
}

/// Tally of an event replay.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub failed: usize,
    /// One message per failed event: `#<index> <event>: <error>`.
    pub errors: Vec<String>,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Replayed {} event(s): {} applied, {} failed",
            self.applied + self.failed,
            self.applied,
            self.failed
        )?;
        for error in &self.errors {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

/// One annotation session over a single form page.
#[derive(Clone, Debug)]
pub struct EditSession {
    store: AnnotationStore,
    state: SessionState,
    mode: EntityKind,
    form_type: String,
    page_number: u32,
    status: Option<String>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// An empty session in section mode, page 1.
    pub fn new() -> Self {
        Self {
            store: AnnotationStore::new(),
            state: SessionState::Idle,
            mode: EntityKind::Section,
            form_type: String::new(),
            page_number: 1,
            status: None,
        }
    }

    // ----------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> EntityKind {
        self.mode
    }

    pub fn editing_id(&self) -> Option<EntityId> {
        self.state.editing_id()
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.state.selected_id()
    }

    pub fn form_type(&self) -> &str {
        &self.form_type
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// The last user-facing message (confirmation or error).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The current list, dropdown and highlight view.
    pub fn view(&self) -> HierarchyView {
        project(&self.store, &self.state)
    }

    // ----------------------------------------------------------------
    // Modes and metadata
    // ----------------------------------------------------------------

    /// Chooses which kind of entity the next drawn rectangle creates.
    pub fn set_mode(&mut self, kind: EntityKind) {
        debug!(mode = kind.code(), "mode changed");
        self.mode = kind;
    }

    /// Sets the form type and page number used on export.
    pub fn set_form_meta(&mut self, form_type: impl Into<String>, page_number: u32) {
        self.form_type = form_type.into();
        self.page_number = page_number;
    }

    // ----------------------------------------------------------------
    // Drawing
    // ----------------------------------------------------------------

    /// Handles a finished rectangle.
    ///
    /// While editing, the rectangle becomes the pending geometry of the
    /// edited entity (replacing any earlier pending box); nothing is created.
    /// Otherwise a new entity of the current mode's kind is created from the
    /// matching form fields.
    ///
    /// # Errors
    /// The store's validation and reference errors when creating. A missing
    /// parent choice is reported as a [`FormtagError::Validation`] error.
    pub fn bbox_drawn(
        &mut self,
        bbox: BoundingBox,
        form: &FormFields,
    ) -> Result<DrawOutcome, FormtagError> {
        if let SessionState::Editing { id, kind, .. } = self.state {
            self.state = SessionState::Editing {
                id,
                kind,
                pending: Some(bbox),
            };
            self.status = Some(format!(
                "New geometry drawn for {} #{}; press Update to apply",
                kind, id
            ));
            return Ok(DrawOutcome::GeometryPending { id });
        }

        let created = self.create(bbox, form);
        match created {
            Ok(id) => {
                let kind = self.mode;
                self.status = Some(format!("{} #{} created", kind, id));
                Ok(DrawOutcome::Created { id, kind })
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn create(&mut self, bbox: BoundingBox, form: &FormFields) -> Result<EntityId, FormtagError> {
        let id = match self.mode {
            EntityKind::Section => self.store.create_section(&form.section_name, bbox)?.id,
            EntityKind::Label => {
                let parent = form
                    .parent_section
                    .ok_or(FormtagError::Validation {
                        kind: EntityKind::Label,
                        field: "parent section",
                    })?;
                self.store.create_label(parent, &form.label_text, bbox)?.id
            }
            EntityKind::Input => {
                let parent = form.parent_label.ok_or(FormtagError::Validation {
                    kind: EntityKind::Input,
                    field: "parent label",
                })?;
                let new_input = NewInput {
                    name: form.input_name.clone(),
                    input_type: Some(form.input_type.clone()),
                    lang: Some(form.input_lang.clone()),
                    value: Some(form.input_value.clone()),
                };
                self.store.create_input(parent, new_input, bbox)?.id
            }
        };
        Ok(id)
    }

    // ----------------------------------------------------------------
    // Editing
    // ----------------------------------------------------------------

    /// Starts editing an entity, discarding any other edit in progress.
    ///
    /// # Errors
    /// [`FormtagError::NotFound`] if the ID does not exist; the state is
    /// unchanged in that case.
    pub fn edit(&mut self, id: EntityId) -> Result<(), FormtagError> {
        let Some(kind) = self.store.kind_of(id) else {
            return Err(self.fail(FormtagError::NotFound(id)));
        };
        self.state = SessionState::Editing {
            id,
            kind,
            pending: None,
        };
        self.status = Some(format!("Editing {} #{}", kind, id));
        Ok(())
    }

    /// Abandons the current edit. Pending geometry is discarded and the
    /// entity keeps its stored values.
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.state.editing_id() {
            self.state = SessionState::Idle;
            self.status = Some(format!("Edit of #{} cancelled", id));
        }
    }

    /// Applies the form to the entity being edited and ends the edit.
    ///
    /// The kind's fields are applied only when its required field (section
    /// name, label text or input name) is non-blank; otherwise they are
    /// silently skipped and only pending geometry is written. A blank parent
    /// choice keeps the current parent. The session is idle afterwards,
    /// whatever the outcome.
    ///
    /// # Errors
    /// [`FormtagError::Reference`] if a chosen parent does not resolve. The
    /// entity is left exactly as it was, pending geometry included.
    pub fn commit_update(&mut self, form: &FormFields) -> Result<CommitOutcome, FormtagError> {
        let SessionState::Editing { id, kind, pending } = self.state else {
            return Ok(CommitOutcome::NotEditing);
        };
        self.state = SessionState::Idle;

        let fields = patch_from_form(kind, form);
        let skipped = fields.is_none();
        let mut patch = fields.unwrap_or_default();
        if let Some(bbox) = pending {
            patch = patch.bounding_box(bbox);
        }
        if !patch.is_empty_for(kind) {
            if let Err(err) = self.store.update_entity(id, &patch) {
                return Err(self.fail(err));
            }
        }

        if skipped {
            debug!(%id, %kind, "required field blank, skipping field update");
            self.status = Some(format!("{} #{} not updated: required field is empty", kind, id));
            return Ok(CommitOutcome::FieldsSkipped { id });
        }
        self.status = Some(format!("{} #{} updated", kind, id));
        Ok(CommitOutcome::Updated { id })
    }

    // ----------------------------------------------------------------
    // Selection and deletion
    // ----------------------------------------------------------------

    /// Toggles the highlight on an entity.
    ///
    /// Selecting the selected entity clears the selection. Ignored while
    /// editing and for unknown IDs. Returns the selection afterwards.
    pub fn select(&mut self, id: EntityId) -> Option<EntityId> {
        match self.state {
            SessionState::Editing { .. } => {}
            SessionState::Selected { id: current } if current == id => {
                self.state = SessionState::Idle;
            }
            _ if self.store.contains(id) => {
                self.state = SessionState::Selected { id };
            }
            _ => debug!(%id, "ignoring selection of unknown id"),
        }
        self.state.selected_id()
    }

    /// Deletes an entity and its descendants.
    ///
    /// If the edited or selected entity is among those removed, the session
    /// returns to idle. Returns the removed IDs; unknown IDs remove nothing.
    pub fn delete(&mut self, id: EntityId) -> Vec<EntityId> {
        let removed = self.store.delete_entity(id);
        if removed.iter().any(|gone| self.state.refers_to(*gone)) {
            self.state = SessionState::Idle;
        }
        if !removed.is_empty() {
            self.status = Some(format!("Deleted {} annotation(s)", removed.len()));
        }
        removed
    }

    /// Removes everything and returns to idle.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.state = SessionState::Idle;
        self.status = Some("All annotations cleared".to_string());
        info!("cleared all annotations");
    }

    // ----------------------------------------------------------------
    // Documents
    // ----------------------------------------------------------------

    /// Exports the store using the session's form type and page number.
    pub fn export(&self) -> FormDocument {
        export_store(
            &self.store,
            &ExportOptions::new(self.form_type.clone(), self.page_number),
        )
    }

    /// Replaces the store with the contents of a document and adopts its
    /// form type and page number.
    ///
    /// # Errors
    /// Store validation errors for malformed fields. The session is left
    /// unchanged on error.
    pub fn import_document(&mut self, doc: &FormDocument) -> Result<(), FormtagError> {
        import_into(&mut self.store, doc).map_err(|err| self.fail(err))?;
        self.state = SessionState::Idle;
        self.form_type = doc.form_type.clone();
        self.page_number = doc.page_number;
        self.status = Some(format!("Imported {} annotation(s)", self.store.len()));
        Ok(())
    }

    /// Parses `json` and imports it.
    ///
    /// # Errors
    /// [`FormtagError::Parse`] for malformed JSON, otherwise as
    /// [`EditSession::import_document`].
    pub fn import_json(&mut self, json: &str) -> Result<(), FormtagError> {
        let doc = io_json::from_json_str(json).map_err(|err| self.fail(err))?;
        self.import_document(&doc)
    }

    // ----------------------------------------------------------------
    // Events
    // ----------------------------------------------------------------

    /// Dispatches one UI event.
    pub fn handle(&mut self, event: &UiEvent) -> Result<(), FormtagError> {
        match event {
            UiEvent::BboxDrawn { bbox, form } => self.bbox_drawn(*bbox, form).map(|_| ()),
            UiEvent::ModeChanged { kind } => {
                self.set_mode(*kind);
                Ok(())
            }
            UiEvent::EditRequested { id } => self.edit(*id),
            UiEvent::DeleteRequested { id } => {
                self.delete(*id);
                Ok(())
            }
            UiEvent::SelectRequested { id } => {
                self.select(*id);
                Ok(())
            }
            UiEvent::CancelEditRequested => {
                self.cancel_edit();
                Ok(())
            }
            UiEvent::ClearAllRequested => {
                self.clear_all();
                Ok(())
            }
            UiEvent::UpdateCommitted { form } => self.commit_update(form).map(|_| ()),
            UiEvent::FormMetaChanged {
                form_type,
                page_number,
            } => {
                self.set_form_meta(form_type.clone(), *page_number);
                Ok(())
            }
        }
    }

    /// Dispatches every event in order. A failing event is recorded and
    /// replay continues with the next one.
    pub fn replay<'a, I>(&mut self, events: I) -> ReplaySummary
    where
        I: IntoIterator<Item = &'a UiEvent>,
    {
        let mut summary = ReplaySummary::default();
        for (index, event) in events.into_iter().enumerate() {
            match self.handle(event) {
                Ok(()) => summary.applied += 1,
                Err(err) => {
                    summary.failed += 1;
                    summary
                        .errors
                        .push(format!("#{} {}: {}", index, event_name(event), err));
                }
            }
        }
        summary
    }

    fn fail(&mut self, err: FormtagError) -> FormtagError {
        warn!(error = %err, "annotation operation rejected");
        self.status = Some(err.to_string());
        err
    }
}

/// The patch a commit applies, or `None` when the kind's required field is
/// blank.
fn patch_from_form(kind: EntityKind, form: &FormFields) -> Option<EntityPatch> {
    let patch = match kind {
        EntityKind::Section => {
            if form.section_name.trim().is_empty() {
                return None;
            }
            EntityPatch::new().name(form.section_name.clone())
        }
        EntityKind::Label => {
            if form.label_text.trim().is_empty() {
                return None;
            }
            let mut patch = EntityPatch::new().text(form.label_text.clone());
            if let Some(parent) = form.parent_section {
                patch = patch.parent(parent);
            }
            patch
        }
        EntityKind::Input => {
            if form.input_name.trim().is_empty() {
                return None;
            }
            let mut patch = EntityPatch::new()
                .name(form.input_name.clone())
                .input_type(form.input_type.clone())
                .lang(Some(form.input_lang.clone()))
                .value(Some(form.input_value.clone()));
            if let Some(parent) = form.parent_label {
                patch = patch.parent(parent);
            }
            patch
        }
    };
    Some(patch)
}

fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::BboxDrawn { .. } => "bbox_drawn",
        UiEvent::ModeChanged { .. } => "mode_changed",
        UiEvent::EditRequested { .. } => "edit_requested",
        UiEvent::DeleteRequested { .. } => "delete_requested",
        UiEvent::SelectRequested { .. } => "select_requested",
        UiEvent::CancelEditRequested => "cancel_edit_requested",
        UiEvent::ClearAllRequested => "clear_all_requested",
        UiEvent::UpdateCommitted { .. } => "update_committed",
        UiEvent::FormMetaChanged { .. } => "form_meta_changed",
    }
}
