//! Prototype catalog.
//!
//! A [`CriterionSpawner`] backed by a map of factories. Hosts that have their
//! own entity system implement the trait directly instead.

use rustc_hash::FxHashMap;

use crate::core::PrototypeId;
use crate::criteria::CriterionBehavior;
use crate::error::ContractError;

use super::{CriterionSpawner, SpawnedEntity};

type Factory = Box<dyn Fn() -> Box<dyn CriterionBehavior>>;

enum Prototype {
    Criterion(Factory),
    Inert,
}

/// Factories keyed by prototype id.
///
/// ## Example
///
/// ```
/// use contract_criteria::core::PrototypeId;
/// use contract_criteria::criteria::ManualCriterion;
/// use contract_criteria::spawning::{CriterionSpawner, PrototypeCatalog};
///
/// let mut catalog = PrototypeCatalog::new()
///     .with_criterion("deliver", || ManualCriterion::new("Deliver the cargo"));
///
/// let spawned = catalog.spawn(&PrototypeId::from("deliver")).unwrap();
/// assert!(spawned.criterion.is_some());
/// ```
#[derive(Default)]
pub struct PrototypeCatalog {
    prototypes: FxHashMap<PrototypeId, Prototype>,
}

impl PrototypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a criterion prototype.
    ///
    /// Panics if the id is already registered.
    pub fn register_criterion<B, F>(&mut self, id: impl Into<PrototypeId>, factory: F)
    where
        B: CriterionBehavior + 'static,
        F: Fn() -> B + 'static,
    {
        let factory: Factory = Box::new(move || Box::new(factory()) as Box<dyn CriterionBehavior>);
        self.insert(id.into(), Prototype::Criterion(factory));
    }

    /// Register a prototype that spawns something other than a criterion.
    pub fn register_inert(&mut self, id: impl Into<PrototypeId>) {
        self.insert(id.into(), Prototype::Inert);
    }

    /// Register a criterion prototype (builder pattern).
    #[must_use]
    pub fn with_criterion<B, F>(mut self, id: impl Into<PrototypeId>, factory: F) -> Self
    where
        B: CriterionBehavior + 'static,
        F: Fn() -> B + 'static,
    {
        self.register_criterion(id, factory);
        self
    }

    /// Register an inert prototype (builder pattern).
    #[must_use]
    pub fn with_inert(mut self, id: impl Into<PrototypeId>) -> Self {
        self.register_inert(id);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &PrototypeId) -> bool {
        self.prototypes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    fn insert(&mut self, id: PrototypeId, prototype: Prototype) {
        if self.prototypes.contains_key(&id) {
            panic!("Prototype `{id}` already registered");
        }
        self.prototypes.insert(id, prototype);
    }
}

impl CriterionSpawner for PrototypeCatalog {
    fn spawn(&mut self, prototype: &PrototypeId) -> Result<SpawnedEntity, ContractError> {
        match self.prototypes.get(prototype) {
            Some(Prototype::Criterion(factory)) => {
                Ok(SpawnedEntity::criterion(prototype.clone(), factory()))
            }
            Some(Prototype::Inert) => Ok(SpawnedEntity::inert(prototype.clone())),
            None => Err(ContractError::UnknownPrototype(prototype.clone())),
        }
    }
}

impl std::fmt::Debug for PrototypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrototypeCatalog")
            .field("prototypes", &self.prototypes.len())
            .finish()
    }
}
