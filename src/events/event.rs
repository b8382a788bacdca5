//! Notification types.

use serde::{Deserialize, Serialize};

use crate::contracts::ContractStatus;
use crate::core::{EntityId, GroupId};
use crate::effects::BoundEffect;

/// A notification raised by the engine.
///
/// Contract-scoped notifications carry the contract handle; criterion-scoped
/// ones carry the criterion handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    StatusChanged {
        contract: EntityId,
        from: ContractStatus,
        to: ContractStatus,
    },

    /// A criterion of `contract` changed its satisfied flag.
    CriteriaUpdated { contract: EntityId },

    /// One-time setup of a freshly spawned criterion.
    CriterionSetup { criterion: EntityId },

    /// The criterion's contract went active.
    StartTicking { criterion: EntityId },

    GroupFulfilled { contract: EntityId, group: GroupId },

    EffectDispatched(BoundEffect),
}

impl ContractEvent {
    /// The contract this notification concerns, if it is contract-scoped.
    #[must_use]
    pub fn contract(&self) -> Option<EntityId> {
        match self {
            Self::StatusChanged { contract, .. }
            | Self::CriteriaUpdated { contract }
            | Self::GroupFulfilled { contract, .. } => Some(*contract),
            Self::EffectDispatched(bound) => Some(bound.contract),
            Self::CriterionSetup { .. } | Self::StartTicking { .. } => None,
        }
    }

    /// The criterion this notification concerns, if it is criterion-scoped.
    #[must_use]
    pub fn criterion(&self) -> Option<EntityId> {
        match self {
            Self::CriterionSetup { criterion } | Self::StartTicking { criterion } => {
                Some(*criterion)
            }
            _ => None,
        }
    }
}
