//! Criteria evaluation.
//!
//! Any change to a criterion's flag raises one criteria-updated notification
//! for its contract, which runs a full evaluation pass over the contract's
//! groups. Passes only run while the contract is Active; anything else is a
//! stale notification and is dropped.

use crate::contracts::ContractStatus;
use crate::core::{EntityId, GroupId};
use crate::criteria::{evaluate_group, GroupOutcome};
use crate::error::{ContractError, Result};
use crate::events::ContractEvent;

use super::ContractWorld;

impl ContractWorld {
    /// Set a criterion's satisfied flag.
    ///
    /// No-op if the flag is unchanged. Otherwise raises exactly one
    /// criteria-updated notification for the owning contract.
    pub fn set_criterion_status(&mut self, criterion: EntityId, satisfied: bool) -> Result<()> {
        let record = self
            .criteria
            .get_mut(&criterion)
            .ok_or(ContractError::CriterionNotFound(criterion))?;
        if !record.set_satisfied(satisfied) {
            return Ok(());
        }

        let contract = record.owning_contract();
        tracing::trace!(%criterion, satisfied, "criterion status changed");
        self.criteria_updated(contract)
    }

    /// Raise a criteria-updated notification for `contract`.
    pub fn criteria_updated(&mut self, contract: EntityId) -> Result<()> {
        self.journal
            .push(ContractEvent::CriteriaUpdated { contract });
        self.evaluate_contract(contract)
    }

    /// Evaluate every unfulfilled group of `contract`, in registration order,
    /// and activate the ones that are satisfied.
    fn evaluate_contract(&mut self, contract: EntityId) -> Result<()> {
        if !self.is_active(contract) {
            tracing::trace!(%contract, "ignoring criteria update for inactive contract");
            return Ok(());
        }
        let Some(registry) = self.registries.get(&contract) else {
            return Ok(());
        };

        // Membership is frozen while Active, so the order snapshot stays valid.
        let groups: Vec<GroupId> = registry.groups().cloned().collect();
        for group in groups {
            // An earlier group's effects may have ended the contract.
            if !self.is_active(contract) {
                break;
            }
            if self.group_outcome(contract, &group)?.is_satisfied() {
                self.activate_group(contract, &group)?;
            }
        }
        Ok(())
    }

    fn group_outcome(&self, contract: EntityId, group: &GroupId) -> Result<GroupOutcome> {
        let registry = self.registry(contract)?;
        if registry.is_fulfilled(group) {
            return Ok(GroupOutcome::Inert);
        }
        let members = registry.criteria(group);
        if members.is_empty() {
            return Ok(GroupOutcome::Inert);
        }

        let mode = self.catalog.require(group)?.mode;
        let flags = members
            .iter()
            .map(|&id| self.criterion(id).map(|c| c.is_satisfied()))
            .collect::<Result<Vec<_>>>()?;
        Ok(evaluate_group(mode, flags))
    }

    fn is_active(&self, contract: EntityId) -> bool {
        self.contracts
            .get(&contract)
            .is_some_and(|c| c.status() == ContractStatus::Active)
    }
}
