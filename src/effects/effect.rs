//! Effect definitions.
//!
//! Effects are the one-shot actions a criteria group performs when it is
//! fulfilled. The set is closed: consumers match on the variant they care
//! about instead of registering for a runtime type.

use serde::{Deserialize, Serialize};

use crate::contracts::ContractStatus;
use crate::core::EntityId;

/// An action applied to a contract when a criteria group is fulfilled.
///
/// ## Lifecycle effects
///
/// - `FinalizeContract`: request `Active -> Finalized`
/// - `BreachContract`: request `Active -> Breached`
///
/// ## Host effects
///
/// - `GrantBonus`: a payout consumed by the host's economy
/// - `Custom`: an arbitrary keyed effect for host handlers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEffect {
    FinalizeContract,

    BreachContract,

    /// Pay `amount` to the contract's participants.
    GrantBonus { amount: i64 },

    /// Host-defined effect. `description` is shown to participants if set.
    Custom {
        key: String,
        description: Option<String>,
    },
}

impl ContractEffect {
    /// Create a custom effect without a description.
    pub fn custom(key: impl Into<String>) -> Self {
        Self::Custom {
            key: key.into(),
            description: None,
        }
    }

    /// Create a custom effect with a participant-facing description.
    pub fn custom_described(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Custom {
            key: key.into(),
            description: Some(description.into()),
        }
    }

    /// Human-readable summary for participants, if the effect has one.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        match self {
            Self::FinalizeContract => Some("The contract is finalized.".to_string()),
            Self::BreachContract => Some("The contract is breached.".to_string()),
            Self::GrantBonus { amount } => Some(format!("Grants a bonus of {amount}.")),
            Self::Custom { description, .. } => description.clone(),
        }
    }

    /// The contract status this effect asks for, if it is a lifecycle effect.
    #[must_use]
    pub fn requested_status(&self) -> Option<ContractStatus> {
        match self {
            Self::FinalizeContract => Some(ContractStatus::Finalized),
            Self::BreachContract => Some(ContractStatus::Breached),
            Self::GrantBonus { .. } | Self::Custom { .. } => None,
        }
    }

    /// Bind this effect to a concrete contract.
    #[must_use]
    pub fn bind(self, contract: EntityId) -> BoundEffect {
        BoundEffect {
            contract,
            effect: self,
        }
    }
}

/// An effect bound to the contract it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundEffect {
    pub contract: EntityId,
    pub effect: ContractEffect,
}
