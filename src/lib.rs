//! # contract-criteria
//!
//! Criteria evaluation and lifecycle state machine for long-lived contracts.
//!
//! ## Design Principles
//!
//! 1. **Groups, not lists**: Criteria are registered under named groups. Each
//!    group has a quantifier (ALL / ANY) and a list of effects applied when it
//!    is fulfilled.
//!
//! 2. **Fire Once**: A group's effects are dispatched at most once per
//!    contract. The group is marked fulfilled before its effects run.
//!
//! 3. **Forward Only**: Contract status moves along
//!    `Uninitialized -> Initiating -> Active -> {Finalized | Breached}` and
//!    nowhere else.
//!
//! ## Architecture
//!
//! - **Explicit store**: `ContractWorld` holds contracts, registries and
//!   criteria keyed by `EntityId`. Criteria refer back to their contract by
//!   handle; the registry owns their lifetime.
//!
//! - **Synchronous**: Every notification is handled to completion on the
//!   caller's stack, including notifications raised from effect handlers.
//!
//! ## Modules
//!
//! - `core`: Entity handles, identifiers, group definitions, configuration
//! - `contracts`: Contract records and the status state machine
//! - `criteria`: Criterion instances, behaviors, registry, group evaluation
//! - `effects`: Effect enum, binding, handler dispatch
//! - `events`: Notifications and the event journal
//! - `spawning`: Criterion spawning collaborator
//! - `engine`: `ContractWorld`, lifecycle controller, evaluator, dispatcher
//! - `summary`: Participant-facing listings

pub mod core;
pub mod contracts;
pub mod criteria;
pub mod effects;
pub mod events;
pub mod spawning;
pub mod engine;
pub mod summary;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    EntityId, GroupId, PrototypeId, CriteriaMode,
    CriteriaGroupDefinition, GroupCatalog, ContractCriteriaConfig, CriterionSlot, WorldConfig,
};

pub use crate::contracts::{Contract, ContractStatus, Participant, ParticipantId, StatusTransition};

pub use crate::criteria::{
    Criterion, CriterionBehavior, CriterionContext, DisplayData,
    CriteriaRegistry, GroupOutcome, evaluate_group,
    ManualCriterion, TimerCriterion,
};

pub use crate::effects::{BoundEffect, ContractEffect, EffectDispatcher, EffectHandler, FollowUp, HandlerContext};

pub use crate::events::{ContractEvent, EventJournal};

pub use crate::spawning::{CriterionSpawner, PrototypeCatalog, SpawnedEntity};

pub use crate::engine::ContractWorld;

pub use crate::summary::{contract_listings, ContractListing, GroupListing, ViewerRole};

pub use crate::error::{ConfigError, ContractError, Result};
