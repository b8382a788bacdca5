//! Criterion instances.
//!
//! A criterion is a boolean condition owned by exactly one contract. The
//! engine owns the `satisfied` flag and the back-reference; the
//! type-specific logic lives behind [`CriterionBehavior`].

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PrototypeId};

/// Participant-facing summary of a criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayData {
    pub description: String,
    pub satisfied: bool,
}

impl DisplayData {
    pub fn new(description: impl Into<String>, satisfied: bool) -> Self {
        Self {
            description: description.into(),
            satisfied,
        }
    }
}

/// Information handed to a behavior during its one-time setup.
#[derive(Clone, Copy, Debug)]
pub struct CriterionContext<'a> {
    pub criterion: EntityId,
    pub contract: EntityId,
    pub prototype: &'a PrototypeId,
}

/// The criterion capability set.
///
/// Only `display_data` is required. The notification hooks default to no-ops
/// so that purely externally-driven criteria stay trivial.
pub trait CriterionBehavior: std::fmt::Debug {
    /// Configure from prototype data. Called once, right after spawning.
    fn setup(&mut self, _ctx: &CriterionContext<'_>) {}

    /// The owning contract went active. Timers start here, not before.
    fn start_ticking(&mut self) {}

    /// Advance by `elapsed` ticks. Return `Some(flag)` to change the
    /// satisfied flag.
    fn tick(&mut self, _elapsed: u64) -> Option<bool> {
        None
    }

    /// Summary for display; `None` hides the criterion.
    fn display_data(&self, satisfied: bool) -> Option<DisplayData>;
}

/// A spawned criterion.
#[derive(Debug)]
pub struct Criterion {
    pub id: EntityId,
    pub prototype: PrototypeId,
    owning_contract: EntityId,
    satisfied: bool,
    ticking: bool,
    behavior: Box<dyn CriterionBehavior>,
}

impl Criterion {
    pub fn new(
        id: EntityId,
        prototype: PrototypeId,
        owning_contract: EntityId,
        behavior: Box<dyn CriterionBehavior>,
    ) -> Self {
        Self {
            id,
            prototype,
            owning_contract,
            satisfied: false,
            ticking: false,
            behavior,
        }
    }

    /// The contract this criterion belongs to. Set once at creation.
    #[must_use]
    pub fn owning_contract(&self) -> EntityId {
        self.owning_contract
    }

    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    #[must_use]
    pub fn display_data(&self) -> Option<DisplayData> {
        self.behavior.display_data(self.satisfied)
    }

    /// Write the flag. Returns `true` if it changed.
    pub(crate) fn set_satisfied(&mut self, satisfied: bool) -> bool {
        if self.satisfied == satisfied {
            return false;
        }
        self.satisfied = satisfied;
        true
    }

    pub(crate) fn setup(&mut self) {
        let ctx = CriterionContext {
            criterion: self.id,
            contract: self.owning_contract,
            prototype: &self.prototype,
        };
        self.behavior.setup(&ctx);
    }

    pub(crate) fn start_ticking(&mut self) {
        self.ticking = true;
        self.behavior.start_ticking();
    }

    pub(crate) fn stop_ticking(&mut self) {
        self.ticking = false;
    }

    /// Tick the behavior if it is running.
    pub(crate) fn tick(&mut self, elapsed: u64) -> Option<bool> {
        if !self.ticking {
            return None;
        }
        self.behavior.tick(elapsed)
    }
}
