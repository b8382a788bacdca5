//! Effect dispatch for fulfilled groups.

use crate::core::{EntityId, GroupId};
use crate::effects::{BoundEffect, ContractEffect, FollowUp};
use crate::error::{ContractError, Result};
use crate::events::ContractEvent;

use super::ContractWorld;

impl ContractWorld {
    /// Fulfill `group` and dispatch its effects: static effects first, then
    /// the contract's extras, in order.
    ///
    /// The group is marked fulfilled before any effect runs, so a re-entrant
    /// evaluation triggered by an effect cannot fire it again.
    ///
    /// Every effect in the list is broadcast, even after an earlier one has
    /// ended the contract. A later lifecycle effect is then rejected (and
    /// logged) but handlers still receive it; check
    /// [`HandlerContext::contract_status`](crate::effects::HandlerContext::contract_status)
    /// to tell.
    pub(crate) fn activate_group(&mut self, contract: EntityId, group: &GroupId) -> Result<()> {
        let definition = self.catalog.require(group)?;
        let registry = self
            .registries
            .get_mut(&contract)
            .ok_or(ContractError::MissingState { contract })?;
        if !registry.mark_fulfilled(group) {
            return Ok(());
        }

        let effects: Vec<ContractEffect> = definition
            .effects
            .iter()
            .chain(registry.extra_effects(group))
            .cloned()
            .collect();

        tracing::debug!(%contract, %group, effects = effects.len(), "criteria group fulfilled");
        self.journal.push(ContractEvent::GroupFulfilled {
            contract,
            group: group.clone(),
        });

        for effect in effects {
            self.dispatch_effect(effect.bind(contract))?;
        }
        Ok(())
    }

    fn dispatch_effect(&mut self, bound: BoundEffect) -> Result<()> {
        tracing::debug!(contract = %bound.contract, effect = ?bound.effect, "dispatching effect");
        self.journal
            .push(ContractEvent::EffectDispatched(bound.clone()));

        if let Some(status) = bound.effect.requested_status() {
            self.request_status(bound.contract, status);
        }

        let status = self.contract(bound.contract)?.status();
        let follow_ups = self.dispatcher.broadcast(&bound, status);
        self.apply_follow_ups(follow_ups)
    }

    fn apply_follow_ups(&mut self, follow_ups: Vec<FollowUp>) -> Result<()> {
        for follow_up in follow_ups {
            match follow_up {
                FollowUp::SetCriterionStatus {
                    criterion,
                    satisfied,
                } => self.set_criterion_status(criterion, satisfied)?,
                FollowUp::SetContractStatus { contract, status } => {
                    self.request_status(contract, status);
                }
            }
        }
        Ok(())
    }
}
