//! Annotation data model for form layouts.
//!
//! A form layout is a three-tier hierarchy drawn over a reference image:
//! sections group labels, and labels group inputs. Every tier carries an
//! axis-aligned rectangle in image-pixel space.
//!
//! # Design Principles
//!
//! 1. **One ID space**: sections, labels and inputs draw their IDs from the
//!    same generator, so an [`EntityId`] alone identifies an entity and its
//!    kind.
//!
//! 2. **Normalized references**: children name their parent by ID; parents
//!    never hold child lists. Deleting a parent therefore cannot leave a
//!    dangling back-reference behind.
//!
//! 3. **Permissive geometry**: [`BoundingBox`] can hold malformed boxes, so
//!    that documents with bad coordinates can be read and then reported by
//!    validation.
//!
//! # Example
//!
//! ```
//! use formtag::model::{BoundingBox, Entity, EntityId, EntityKind, Section};
//!
//! let section = Entity::Section(Section {
//!     id: EntityId::new(1),
//!     name: "Personal Info".into(),
//!     bounding_box: BoundingBox::from_xyxy(10.0, 10.0, 200.0, 50.0),
//! });
//! assert_eq!(section.kind(), EntityKind::Section);
//! ```

mod bbox;
mod coord;
mod entity;
mod ids;
pub mod vocab;

// Re-export core types for convenient access
pub use bbox::{BoundingBox, MIN_EXTENT_PX};
pub use coord::Point;
pub(crate) use entity::{input_type_or_default, non_blank};
pub use entity::{Entity, EntityKind, Input, Label, NewInput, Section};
pub use ids::{EntityId, IdGenerator};
