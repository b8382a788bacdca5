//! Event journal.
//!
//! Uses an `im` vector so observers can take O(1) snapshots while the world
//! keeps appending.

use im::Vector;

use crate::core::EntityId;

use super::ContractEvent;

/// Ordered record of notifications, optionally bounded.
#[derive(Clone, Debug, Default)]
pub struct EventJournal {
    events: Vector<ContractEvent>,
    limit: Option<usize>,
    dropped: u64,
}

impl EventJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` events; older ones are dropped first.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: ContractEvent) {
        self.events.push_back(event);
        if let Some(limit) = self.limit {
            while self.events.len() > limit {
                self.events.pop_front();
                self.dropped += 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractEvent> {
        self.events.iter()
    }

    /// Cheap copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vector<ContractEvent> {
        self.events.clone()
    }

    /// Events scoped to `contract`.
    pub fn for_contract(&self, contract: EntityId) -> impl Iterator<Item = &ContractEvent> {
        self.events
            .iter()
            .filter(move |e| e.contract() == Some(contract))
    }

    /// Number of criteria-updated notifications raised for `contract`.
    #[must_use]
    pub fn criteria_updates(&self, contract: EntityId) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ContractEvent::CriteriaUpdated { contract: c } if *c == contract))
            .count()
    }

    /// Events dropped because of the limit.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
