//! Effect broadcasting.
//!
//! Handlers subscribe once and see every bound effect, in subscription order.
//! They cannot touch the world directly while an evaluation pass is running;
//! instead they queue follow-ups on the [`HandlerContext`], which the world
//! applies synchronously as soon as the broadcast for that effect returns.

use crate::contracts::ContractStatus;
use crate::core::EntityId;

use super::BoundEffect;

/// Identifier returned by [`EffectDispatcher::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u32);

/// A change a handler asks the world to make after it returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    SetCriterionStatus { criterion: EntityId, satisfied: bool },
    SetContractStatus { contract: EntityId, status: ContractStatus },
}

/// What a handler can see and request during a broadcast.
#[derive(Debug)]
pub struct HandlerContext {
    status: ContractStatus,
    follow_ups: Vec<FollowUp>,
}

impl HandlerContext {
    /// Create a context for a contract currently in `status`.
    #[must_use]
    pub fn new(status: ContractStatus) -> Self {
        Self {
            status,
            follow_ups: Vec::new(),
        }
    }

    /// Status of the bound contract when the broadcast started.
    #[must_use]
    pub fn contract_status(&self) -> ContractStatus {
        self.status
    }

    /// Queue a criterion status change.
    pub fn set_criterion_status(&mut self, criterion: EntityId, satisfied: bool) {
        self.follow_ups.push(FollowUp::SetCriterionStatus {
            criterion,
            satisfied,
        });
    }

    /// Queue a contract status change.
    pub fn request_status(&mut self, contract: EntityId, status: ContractStatus) {
        self.follow_ups
            .push(FollowUp::SetContractStatus { contract, status });
    }

    /// Follow-ups queued so far.
    #[must_use]
    pub fn follow_ups(&self) -> &[FollowUp] {
        &self.follow_ups
    }

    #[must_use]
    pub fn into_follow_ups(self) -> Vec<FollowUp> {
        self.follow_ups
    }
}

/// Subscriber to bound effects.
pub trait EffectHandler {
    fn handle(&mut self, effect: &BoundEffect, ctx: &mut HandlerContext);
}

impl<F> EffectHandler for F
where
    F: FnMut(&BoundEffect, &mut HandlerContext),
{
    fn handle(&mut self, effect: &BoundEffect, ctx: &mut HandlerContext) {
        self(effect, ctx);
    }
}

/// Ordered list of effect handlers.
#[derive(Default)]
pub struct EffectDispatcher {
    handlers: Vec<(HandlerId, Box<dyn EffectHandler>)>,
    next_id: u32,
}

impl EffectDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. Handlers run in subscription order.
    pub fn subscribe(&mut self, handler: impl EffectHandler + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id);
        self.handlers.len() != before
    }

    /// Deliver `effect` to every handler and collect their follow-ups.
    pub fn broadcast(&mut self, effect: &BoundEffect, status: ContractStatus) -> Vec<FollowUp> {
        let mut ctx = HandlerContext::new(status);
        for (_, handler) in &mut self.handlers {
            handler.handle(effect, &mut ctx);
        }
        ctx.into_follow_ups()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EffectDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
