//! Per-contract criteria registry.
//!
//! The registry maps group ids to the criteria registered under them, in
//! insertion order, and remembers which groups have already fired. A group id
//! is in the fulfilled set if and only if its effects were dispatched once.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{ContractCriteriaConfig, CriterionSlot, EntityId, GroupId};
use crate::effects::ContractEffect;

/// Criteria state attached to one contract.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CriteriaRegistry {
    /// Criteria to spawn when the contract starts initiating.
    slots: Vec<CriterionSlot>,

    /// Group ids in first-registration order.
    order: Vec<GroupId>,

    /// Criteria per group, in registration order.
    criteria: FxHashMap<GroupId, Vec<EntityId>>,

    fulfilled: FxHashSet<GroupId>,

    /// Per-contract effects appended after a group's static effects.
    extra_effects: FxHashMap<GroupId, Vec<ContractEffect>>,
}

impl CriteriaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a contract's criteria configuration.
    #[must_use]
    pub fn from_config(config: ContractCriteriaConfig) -> Self {
        Self {
            slots: config.slots,
            extra_effects: config.extra_effects,
            ..Self::default()
        }
    }

    /// Criteria prototypes to spawn on initiation.
    #[must_use]
    pub fn slots(&self) -> &[CriterionSlot] {
        &self.slots
    }

    /// Register a criterion under `group`, creating the group if needed.
    pub fn insert(&mut self, group: GroupId, criterion: EntityId) {
        match self.criteria.get_mut(&group) {
            Some(list) => list.push(criterion),
            None => {
                self.order.push(group.clone());
                self.criteria.insert(group, vec![criterion]);
            }
        }
    }

    /// Group ids in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &GroupId> {
        self.order.iter()
    }

    /// Criteria registered under `group`, in registration order.
    #[must_use]
    pub fn criteria(&self, group: &GroupId) -> &[EntityId] {
        self.criteria.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every registered criterion, group by group.
    pub fn all_criteria(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order
            .iter()
            .flat_map(move |group| self.criteria(group).iter().copied())
    }

    /// Groups with their criteria, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &[EntityId])> {
        self.order.iter().map(move |group| (group, self.criteria(group)))
    }

    #[must_use]
    pub fn is_fulfilled(&self, group: &GroupId) -> bool {
        self.fulfilled.contains(group)
    }

    /// Mark `group` fulfilled. Returns `false` if it already was.
    pub fn mark_fulfilled(&mut self, group: &GroupId) -> bool {
        self.fulfilled.insert(group.clone())
    }

    /// Fulfilled groups, in registration order.
    pub fn fulfilled_groups(&self) -> impl Iterator<Item = &GroupId> {
        self.order.iter().filter(move |g| self.fulfilled.contains(*g))
    }

    #[must_use]
    pub fn extra_effects(&self, group: &GroupId) -> &[ContractEffect] {
        self.extra_effects.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn add_extra_effect(&mut self, group: GroupId, effect: ContractEffect) {
        self.extra_effects.entry(group).or_default().push(effect);
    }

    /// Total number of registered criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
