use hm_core::{EntityId, EntityKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("entity {id} is not a {expected}")]
    WrongKind { id: EntityId, expected: EntityKind },

    #[error("entity {0} already exists")]
    Duplicate(EntityId),
}

pub type WorldResult<T> = Result<T, WorldError>;
