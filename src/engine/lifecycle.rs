//! Contract lifecycle controller.
//!
//! Status is set from outside (or requested by lifecycle effects); this file
//! enforces legality and reacts to the transitions it cares about:
//!
//! - `Uninitialized -> Initiating`: spawn the configured criteria
//! - `Initiating -> Active`: tell every criterion to start ticking
//! - `Active -> Finalized | Breached`: stop ticking
//!
//! Contracts without a registry change status but get no reactions.

use crate::contracts::{ContractStatus, StatusTransition};
use crate::core::{CriterionSlot, EntityId, GroupId, PrototypeId};
use crate::criteria::{Criterion, CriterionBehavior};
use crate::error::{ContractError, Result};
use crate::events::ContractEvent;

use super::ContractWorld;

/// A configured slot whose behavior has been spawned but not yet installed.
struct PendingCriterion {
    slot: CriterionSlot,
    behavior: Box<dyn CriterionBehavior>,
}

impl ContractWorld {
    /// Move a contract to `status`.
    ///
    /// Fails with [`ContractError::IllegalTransition`] and leaves the contract
    /// untouched for anything off the lifecycle path. Entering Initiating
    /// spawns every configured criterion first; if any of them fails, the
    /// error is returned and neither the status nor the criteria change.
    pub fn set_contract_status(&mut self, contract: EntityId, status: ContractStatus) -> Result<()> {
        let from = self.contract(contract)?.status();
        if !from.can_transition_to(status) {
            tracing::debug!(%contract, %from, to = %status, "illegal status transition");
            return Err(ContractError::IllegalTransition { from, to: status });
        }

        let transition = StatusTransition::new(from, status);
        let pending = self.prepare_transition(contract, transition)?;

        if let Some(record) = self.contracts.get_mut(&contract) {
            record.set_status(status);
        }
        tracing::debug!(%contract, %from, to = %status, "contract status changed");
        self.journal.push(ContractEvent::StatusChanged {
            contract,
            from,
            to: status,
        });

        self.on_status_changed(contract, transition, pending);
        Ok(())
    }

    /// Request `Active -> Finalized`. Returns `false` if the contract could
    /// not be finalized.
    pub fn try_finalize(&mut self, contract: EntityId) -> bool {
        self.request_status(contract, ContractStatus::Finalized)
    }

    /// Request `Active -> Breached`. Returns `false` if the contract could
    /// not be breached.
    pub fn try_breach(&mut self, contract: EntityId) -> bool {
        self.request_status(contract, ContractStatus::Breached)
    }

    /// Soft status change used by effects and handler follow-ups.
    pub(crate) fn request_status(&mut self, contract: EntityId, status: ContractStatus) -> bool {
        match self.set_contract_status(contract, status) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%contract, to = %status, %err, "status request rejected");
                false
            }
        }
    }

    /// Spawn a criterion from `prototype` and register it under `group`.
    ///
    /// The contract must carry a registry and must not be active yet.
    pub fn add_criterion(
        &mut self,
        contract: EntityId,
        prototype: &PrototypeId,
        group: impl Into<GroupId>,
    ) -> Result<EntityId> {
        // A contract without a registry cannot take criteria.
        self.registry(contract)?;
        let status = self.contract(contract)?.status();
        if !status.accepts_criteria() {
            return Err(ContractError::RegistryFrozen { contract, status });
        }

        let behavior = self.spawn_behavior(prototype)?;
        let criterion = self.install_criterion(contract, prototype.clone(), behavior);
        self.registry_mut(contract)?.insert(group.into(), criterion);
        Ok(criterion)
    }

    /// Ask the spawner for `prototype` and check it is a criterion.
    fn spawn_behavior(&mut self, prototype: &PrototypeId) -> Result<Box<dyn CriterionBehavior>> {
        let spawned = self.spawner.spawn(prototype)?;
        debug_assert!(
            spawned.criterion.is_some(),
            "The criterion {prototype} is missing required components!"
        );
        spawned.criterion.ok_or_else(|| {
            tracing::error!(%prototype, "spawned entity is not a criterion");
            ContractError::MissingCapability {
                prototype: prototype.clone(),
            }
        })
    }

    fn install_criterion(
        &mut self,
        contract: EntityId,
        prototype: PrototypeId,
        behavior: Box<dyn CriterionBehavior>,
    ) -> EntityId {
        let id = self.ids.alloc();
        let mut criterion = Criterion::new(id, prototype, contract, behavior);
        criterion.setup();
        tracing::debug!(%contract, criterion = %id, prototype = %criterion.prototype, "criterion spawned");
        self.criteria.insert(id, criterion);
        self.journal
            .push(ContractEvent::CriterionSetup { criterion: id });
        id
    }

    /// Fallible work for a transition, done before the status is committed.
    ///
    /// For `Uninitialized -> Initiating` this spawns every configured slot.
    /// Nothing is installed in the world until all of them succeed.
    fn prepare_transition(
        &mut self,
        contract: EntityId,
        transition: StatusTransition,
    ) -> Result<Vec<PendingCriterion>> {
        if transition != StatusTransition::new(ContractStatus::Uninitialized, ContractStatus::Initiating) {
            return Ok(Vec::new());
        }
        let Some(registry) = self.registries.get(&contract) else {
            return Ok(Vec::new());
        };

        let slots = registry.slots().to_vec();
        slots
            .into_iter()
            .map(|slot| -> Result<PendingCriterion> {
                let behavior = self.spawn_behavior(&slot.prototype)?;
                Ok(PendingCriterion { slot, behavior })
            })
            .collect()
    }

    fn on_status_changed(
        &mut self,
        contract: EntityId,
        transition: StatusTransition,
        pending: Vec<PendingCriterion>,
    ) {
        if !self.registries.contains_key(&contract) {
            return;
        }

        match (transition.from, transition.to) {
            (ContractStatus::Uninitialized, ContractStatus::Initiating) => {
                for PendingCriterion { slot, behavior } in pending {
                    let id = self.install_criterion(contract, slot.prototype, behavior);
                    if let Some(registry) = self.registries.get_mut(&contract) {
                        registry.insert(slot.group, id);
                    }
                }
            }
            (ContractStatus::Initiating, ContractStatus::Active) => self.start_ticking(contract),
            (ContractStatus::Active, ContractStatus::Finalized | ContractStatus::Breached) => {
                self.stop_ticking(contract)
            }
            _ => {}
        }
    }

    fn start_ticking(&mut self, contract: EntityId) {
        let Some(registry) = self.registries.get(&contract) else {
            return;
        };
        for id in registry.all_criteria() {
            if let Some(criterion) = self.criteria.get_mut(&id) {
                criterion.start_ticking();
                self.journal
                    .push(ContractEvent::StartTicking { criterion: id });
            }
        }
    }

    fn stop_ticking(&mut self, contract: EntityId) {
        let Some(registry) = self.registries.get(&contract) else {
            return;
        };
        for id in registry.all_criteria() {
            if let Some(criterion) = self.criteria.get_mut(&id) {
                criterion.stop_ticking();
            }
        }
    }
}
