//! Base DTO carrying the entity identifier, plus the entity/wire seams

use crate::core::aspect::AspectSchema;
use crate::core::entity::Entity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier-carrying base for wire transfer objects
///
/// Outgoing DTOs copy the id from an entity; incoming DTOs start empty and
/// are filled in by form binding. The id is never re-derived after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDto {
    pub id: Option<i64>,
}

impl BaseDto {
    /// Outgoing constructor; a missing entity yields an empty id
    pub fn from_entity<E: Entity>(entity: Option<&E>) -> Self {
        Self {
            id: entity.and_then(Entity::id),
        }
    }

    /// Incoming constructor, fields populated afterwards by form binding
    pub fn empty() -> Self {
        Self { id: None }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

/// Wire mapping contract between an entity and its transfer object
///
/// The controller drives all four seams: outgoing responses go through
/// [`Dto::from_entity`], creates through [`Dto::to_new_entity`], updates
/// through [`Dto::apply_to`]. Implementations check each attribute against
/// the schema's modifiable flag before applying it.
pub trait Dto<E: Entity>: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Outgoing: build the wire form of a persisted entity
    fn from_entity(entity: &E) -> Self;

    /// Incoming create: materialize a new, unsaved entity
    fn to_new_entity(&self) -> E;

    /// Incoming update: apply submitted attributes onto an existing entity,
    /// honoring the schema's modifiable flags
    fn apply_to(&self, entity: &mut E, schema: &AspectSchema);

    /// The identifier carried by this DTO, if any
    fn id(&self) -> Option<i64>;
}
