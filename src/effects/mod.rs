//! Effect system for fulfilled criteria groups.
//!
//! - `ContractEffect`: closed set of effects a group can carry
//! - `BoundEffect`: an effect bound to the contract it applies to
//! - `EffectDispatcher`: broadcasts bound effects to `EffectHandler`s
//!
//! Lifecycle effects (finalize, breach) are consumed by the engine itself
//! before handlers see them; every effect is still broadcast so hosts can
//! react to all of them.

mod dispatcher;
mod effect;

pub use dispatcher::{EffectDispatcher, EffectHandler, FollowUp, HandlerContext, HandlerId};
pub use effect::{BoundEffect, ContractEffect};
