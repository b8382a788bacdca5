//! The contract world.
//!
//! [`ContractWorld`] is the explicit store for contracts, their criteria
//! registries and criterion instances, keyed by [`EntityId`]. It also owns the
//! collaborators the engine talks to: the group catalog, the criterion
//! spawner, the effect dispatcher and the event journal.
//!
//! The behavior is split by concern:
//! - `lifecycle`: status transitions and the reactions to them
//! - `evaluation`: criterion status changes and group evaluation passes
//! - `dispatch`: group activation and effect broadcasting
//!
//! Everything runs synchronously on the caller's stack. A notification raised
//! while handling another one is processed to completion before control
//! returns.
//!
//! ## Example
//!
//! ```
//! use contract_criteria::contracts::ContractStatus;
//! use contract_criteria::core::{ContractCriteriaConfig, CriteriaGroupDefinition, GroupCatalog, GroupId};
//! use contract_criteria::criteria::ManualCriterion;
//! use contract_criteria::effects::ContractEffect;
//! use contract_criteria::engine::ContractWorld;
//! use contract_criteria::spawning::PrototypeCatalog;
//!
//! let catalog = GroupCatalog::new().with_group(
//!     CriteriaGroupDefinition::all("payment").with_effect(ContractEffect::FinalizeContract),
//! );
//! let prototypes = PrototypeCatalog::new()
//!     .with_criterion("deliver", || ManualCriterion::new("Deliver the cargo"));
//! let mut world = ContractWorld::new(catalog, prototypes);
//!
//! let contract = world.create_contract("Cargo run");
//! world
//!     .attach_criteria(contract, ContractCriteriaConfig::new().with_criterion("payment", "deliver"))
//!     .unwrap();
//! world.set_contract_status(contract, ContractStatus::Initiating).unwrap();
//! world.set_contract_status(contract, ContractStatus::Active).unwrap();
//!
//! let criterion = world.registry(contract).unwrap().criteria(&GroupId::from("payment"))[0];
//! world.set_criterion_status(criterion, true).unwrap();
//!
//! assert_eq!(world.contract(contract).unwrap().status(), ContractStatus::Finalized);
//! ```

mod dispatch;
mod evaluation;
mod lifecycle;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::contracts::{Contract, ContractStatus};
use crate::core::{
    ContractCriteriaConfig, EntityAllocator, EntityId, GroupCatalog, GroupId, WorldConfig,
};
use crate::criteria::{CriteriaRegistry, Criterion, DisplayData};
use crate::effects::{ContractEffect, EffectDispatcher, EffectHandler, HandlerId};
use crate::error::{ContractError, Result};
use crate::events::EventJournal;
use crate::spawning::CriterionSpawner;

/// Store and driver for contracts and their criteria.
pub struct ContractWorld {
    contracts: FxHashMap<EntityId, Contract>,
    /// Contract handles in creation order.
    contract_order: Vec<EntityId>,
    registries: FxHashMap<EntityId, CriteriaRegistry>,
    criteria: FxHashMap<EntityId, Criterion>,

    catalog: GroupCatalog,
    spawner: Box<dyn CriterionSpawner>,
    dispatcher: EffectDispatcher,
    journal: EventJournal,

    ids: EntityAllocator,
    rng: ChaCha8Rng,
}

impl ContractWorld {
    /// Create a world with default configuration.
    pub fn new(catalog: GroupCatalog, spawner: impl CriterionSpawner + 'static) -> Self {
        Self::with_config(WorldConfig::default(), catalog, spawner)
    }

    pub fn with_config(
        config: WorldConfig,
        catalog: GroupCatalog,
        spawner: impl CriterionSpawner + 'static,
    ) -> Self {
        Self {
            contracts: FxHashMap::default(),
            contract_order: Vec::new(),
            registries: FxHashMap::default(),
            criteria: FxHashMap::default(),
            catalog,
            spawner: Box::new(spawner),
            dispatcher: EffectDispatcher::new(),
            journal: EventJournal::with_limit(config.journal_limit),
            ids: EntityAllocator::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    // === Contracts ===

    /// Create an uninitialized contract without a criteria registry.
    pub fn create_contract(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.ids.alloc();
        let uuid = self.next_uuid();
        self.contracts.insert(id, Contract::new(id, uuid, name));
        self.contract_order.push(id);
        tracing::debug!(contract = %id, %uuid, "contract created");
        id
    }

    /// Create a contract and attach a criteria registry built from `config`.
    pub fn create_contract_with_criteria(
        &mut self,
        name: impl Into<String>,
        config: ContractCriteriaConfig,
    ) -> EntityId {
        let id = self.create_contract(name);
        self.registries.insert(id, CriteriaRegistry::from_config(config));
        id
    }

    /// Attach (or replace) a contract's criteria registry.
    ///
    /// Only allowed before the contract starts initiating. Criteria already
    /// added to a replaced registry are destroyed with it.
    pub fn attach_criteria(&mut self, contract: EntityId, config: ContractCriteriaConfig) -> Result<()> {
        let status = self.contract(contract)?.status();
        if status != ContractStatus::Uninitialized {
            return Err(ContractError::RegistryFrozen { contract, status });
        }
        let replaced = self
            .registries
            .insert(contract, CriteriaRegistry::from_config(config));
        if let Some(registry) = replaced {
            self.destroy_criteria(&registry);
        }
        Ok(())
    }

    /// Remove a contract together with its registry and criteria.
    pub fn remove_contract(&mut self, contract: EntityId) -> Result<Contract> {
        let record = self
            .contracts
            .remove(&contract)
            .ok_or(ContractError::ContractNotFound(contract))?;
        self.contract_order.retain(|&id| id != contract);

        if let Some(registry) = self.registries.remove(&contract) {
            self.destroy_criteria(&registry);
        }
        tracing::debug!(%contract, "contract removed");
        Ok(record)
    }

    fn destroy_criteria(&mut self, registry: &CriteriaRegistry) {
        for criterion in registry.all_criteria() {
            self.criteria.remove(&criterion);
        }
    }

    pub fn contract(&self, contract: EntityId) -> Result<&Contract> {
        self.contracts
            .get(&contract)
            .ok_or(ContractError::ContractNotFound(contract))
    }

    #[must_use]
    pub fn try_contract(&self, contract: EntityId) -> Option<&Contract> {
        self.contracts.get(&contract)
    }

    /// Mutable access for participant and description edits.
    ///
    /// Status is not writable through this; use
    /// [`ContractWorld::set_contract_status`].
    pub fn contract_mut(&mut self, contract: EntityId) -> Result<&mut Contract> {
        self.contracts
            .get_mut(&contract)
            .ok_or(ContractError::ContractNotFound(contract))
    }

    /// Contracts in creation order.
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contract_order
            .iter()
            .filter_map(move |id| self.contracts.get(id))
    }

    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    // === Registries ===

    /// The contract's registry. Missing state is an error, not an option.
    pub fn registry(&self, contract: EntityId) -> Result<&CriteriaRegistry> {
        self.contract(contract)?;
        self.registries.get(&contract).ok_or_else(|| {
            tracing::error!(%contract, "contract has no criteria registry");
            ContractError::MissingState { contract }
        })
    }

    #[must_use]
    pub fn try_registry(&self, contract: EntityId) -> Option<&CriteriaRegistry> {
        self.registries.get(&contract)
    }

    fn registry_mut(&mut self, contract: EntityId) -> Result<&mut CriteriaRegistry> {
        if !self.contracts.contains_key(&contract) {
            return Err(ContractError::ContractNotFound(contract));
        }
        self.registries.get_mut(&contract).ok_or_else(|| {
            tracing::error!(%contract, "contract has no criteria registry");
            ContractError::MissingState { contract }
        })
    }

    /// Append an effect to `group`'s per-contract extras.
    pub fn add_extra_effect(
        &mut self,
        contract: EntityId,
        group: impl Into<GroupId>,
        effect: ContractEffect,
    ) -> Result<()> {
        self.registry_mut(contract)?
            .add_extra_effect(group.into(), effect);
        Ok(())
    }

    // === Criteria ===

    pub fn criterion(&self, criterion: EntityId) -> Result<&Criterion> {
        self.criteria
            .get(&criterion)
            .ok_or(ContractError::CriterionNotFound(criterion))
    }

    #[must_use]
    pub fn try_criterion(&self, criterion: EntityId) -> Option<&Criterion> {
        self.criteria.get(&criterion)
    }

    /// Display summary of a criterion, if it exists and chooses to show one.
    #[must_use]
    pub fn try_get_display_data(&self, criterion: EntityId) -> Option<DisplayData> {
        self.criteria.get(&criterion)?.display_data()
    }

    #[must_use]
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Advance every ticking criterion by `elapsed`, in creation order.
    pub fn tick(&mut self, elapsed: u64) -> Result<()> {
        let mut ticking: Vec<EntityId> = self
            .criteria
            .iter()
            .filter(|(_, c)| c.is_ticking())
            .map(|(&id, _)| id)
            .collect();
        ticking.sort_unstable();

        for id in ticking {
            // An earlier criterion's effects may have stopped or removed this one.
            let Some(criterion) = self.criteria.get_mut(&id) else {
                continue;
            };
            if let Some(satisfied) = criterion.tick(elapsed) {
                self.set_criterion_status(id, satisfied)?;
            }
        }
        Ok(())
    }

    // === Collaborators ===

    /// Subscribe to every dispatched effect.
    pub fn subscribe(&mut self, handler: impl EffectHandler + 'static) -> HandlerId {
        self.dispatcher.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, handler: HandlerId) -> bool {
        self.dispatcher.unsubscribe(handler)
    }

    #[must_use]
    pub fn catalog(&self) -> &GroupCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut EventJournal {
        &mut self.journal
    }

    fn next_uuid(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

impl std::fmt::Debug for ContractWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractWorld")
            .field("contracts", &self.contracts.len())
            .field("criteria", &self.criteria.len())
            .field("groups", &self.catalog.len())
            .field("dispatcher", &self.dispatcher)
            .field("journal", &self.journal.len())
            .finish()
    }
}
