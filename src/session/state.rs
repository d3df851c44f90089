//! The edit/selection state of a session.

use serde::Serialize;

use crate::model::{BoundingBox, EntityId, EntityKind};

/// What the user is currently doing with existing entities.
///
/// Editing and selection are variants of one value, so a session can never
/// be editing one entity while another is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Drawn boxes create new entities of the current mode's kind.
    #[default]
    Idle,
    /// Drawn boxes replace the geometry of `id` once the edit is committed.
    Editing {
        id: EntityId,
        kind: EntityKind,
        /// The most recently drawn replacement box, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        pending: Option<BoundingBox>,
    },
    /// `id` is highlighted; drawing still creates new entities.
    Selected { id: EntityId },
}

impl SessionState {
    pub fn editing_id(&self) -> Option<EntityId> {
        match self {
            SessionState::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        match self {
            SessionState::Selected { id } => Some(*id),
            _ => None,
        }
    }

    pub fn pending_geometry(&self) -> Option<BoundingBox> {
        match self {
            SessionState::Editing { pending, .. } => *pending,
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, SessionState::Editing { .. })
    }

    /// True if the state refers to `id` (as edited or selected entity).
    pub fn refers_to(&self, id: EntityId) -> bool {
        self.editing_id() == Some(id) || self.selected_id() == Some(id)
    }
}
