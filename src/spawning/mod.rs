//! Criterion spawning.
//!
//! The engine never constructs criteria itself. It asks a
//! [`CriterionSpawner`] for an entity by prototype id and then checks that
//! the entity actually carries the criterion capability.

mod prototypes;

pub use prototypes::PrototypeCatalog;

use crate::core::PrototypeId;
use crate::criteria::CriterionBehavior;
use crate::error::ContractError;

/// An entity produced by a spawner.
///
/// `criterion` is `None` when the prototype names something that is not a
/// criterion; the engine treats that as a configuration fault.
#[derive(Debug)]
pub struct SpawnedEntity {
    pub prototype: PrototypeId,
    pub criterion: Option<Box<dyn CriterionBehavior>>,
}

impl SpawnedEntity {
    pub fn criterion(prototype: PrototypeId, behavior: Box<dyn CriterionBehavior>) -> Self {
        Self {
            prototype,
            criterion: Some(behavior),
        }
    }

    /// An entity without the criterion capability.
    #[must_use]
    pub fn inert(prototype: PrototypeId) -> Self {
        Self {
            prototype,
            criterion: None,
        }
    }
}

/// External collaborator that instantiates prototypes.
pub trait CriterionSpawner {
    fn spawn(&mut self, prototype: &PrototypeId) -> Result<SpawnedEntity, ContractError>;
}
