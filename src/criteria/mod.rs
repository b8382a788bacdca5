//! Criteria: conditions attached to contracts, grouped under quantifiers.
//!
//! ## Key Components
//!
//! - [`Criterion`]: a spawned condition instance with a satisfied flag
//! - [`CriterionBehavior`]: the type-specific capability set
//! - [`CriteriaRegistry`]: per-contract group membership and fulfillment
//! - [`evaluate_group`]: ALL / ANY evaluation over a group's flags
//!
//! ## Example
//!
//! ```
//! use contract_criteria::core::{CriteriaMode, EntityId, GroupId};
//! use contract_criteria::criteria::{evaluate_group, CriteriaRegistry, GroupOutcome};
//!
//! let mut registry = CriteriaRegistry::new();
//! registry.insert(GroupId::from("payment"), EntityId(1));
//! registry.insert(GroupId::from("payment"), EntityId(2));
//!
//! let flags = [true, false];
//! assert_eq!(evaluate_group(CriteriaMode::All, flags), GroupOutcome::Unsatisfied);
//! assert_eq!(evaluate_group(CriteriaMode::Any, flags), GroupOutcome::Satisfied);
//! ```

mod builtin;
mod criterion;
mod evaluator;
mod registry;

pub use builtin::{ManualCriterion, TimerCriterion};
pub use criterion::{Criterion, CriterionBehavior, CriterionContext, DisplayData};
pub use evaluator::{evaluate_group, GroupOutcome};
pub use registry::CriteriaRegistry;
