//! Error types.
//!
//! Configuration faults and missing state are hard failures: callers get a
//! `ContractError` and are expected to treat it as a bug in their setup.
//! Stale notifications are never errors; they are ignored where they arrive.

use thiserror::Error;

use crate::contracts::ContractStatus;
use crate::core::{EntityId, GroupId, PrototypeId};

/// Errors produced while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A satisfaction mode other than `all` or `any`.
    #[error("unknown criteria mode `{0}` (expected `all` or `any`)")]
    UnknownMode(String),
}

/// Errors produced by the contract engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("{0} is not a contract")]
    ContractNotFound(EntityId),

    #[error("{0} is not a criterion")]
    CriterionNotFound(EntityId),

    /// The contract exists but carries no criteria registry.
    #[error("contract {contract} has no criteria registry")]
    MissingState { contract: EntityId },

    #[error("no prototype named `{0}`")]
    UnknownPrototype(PrototypeId),

    /// The spawned entity does not expose the criterion capability.
    #[error("the criterion prototype `{prototype}` is missing required components")]
    MissingCapability { prototype: PrototypeId },

    /// Criteria can only be added before the contract goes active.
    #[error("criteria of contract {contract} are frozen while {status}")]
    RegistryFrozen {
        contract: EntityId,
        status: ContractStatus,
    },

    #[error("illegal contract status transition {from} -> {to}")]
    IllegalTransition {
        from: ContractStatus,
        to: ContractStatus,
    },

    /// A registry references a group the catalog does not define.
    #[error("criteria group `{group}` is not defined")]
    UnknownGroup { group: GroupId },
}

/// Crate result alias.
pub type Result<T, E = ContractError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ContractError::MissingState {
            contract: EntityId(7),
        };
        assert_eq!(err.to_string(), "contract Entity(7) has no criteria registry");

        let err = ContractError::IllegalTransition {
            from: ContractStatus::Uninitialized,
            to: ContractStatus::Active,
        };
        assert_eq!(
            err.to_string(),
            "illegal contract status transition Uninitialized -> Active"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::UnknownMode("most".to_string());
        assert_eq!(
            err.to_string(),
            "unknown criteria mode `most` (expected `all` or `any`)"
        );
    }
}
