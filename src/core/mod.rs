//! Core types: entity handles, identifiers, and configuration.
//!
//! Nothing in here knows about contract status or evaluation; it is the
//! vocabulary the rest of the engine is written in.

pub mod entity;
pub mod config;

pub use entity::{EntityAllocator, EntityId};
pub use config::{
    ContractCriteriaConfig, CriteriaGroupDefinition, CriteriaMode, CriterionSlot, GroupCatalog,
    GroupId, PrototypeId, WorldConfig,
};
