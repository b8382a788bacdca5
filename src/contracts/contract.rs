//! Contract records.
//!
//! A contract's status is only mutable through the world, which enforces the
//! lifecycle state machine. Everything else is plain data owned by the host.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::EntityId;

use super::status::ContractStatus;

/// Opaque participant identity. Resolved to a person elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant({})", self.0)
    }
}

/// A participant as referenced by a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
}

impl Participant {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
        }
    }
}

/// A long-lived agreement whose lifecycle is driven by its criteria.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contract {
    /// Handle in the world.
    pub id: EntityId,

    /// Stable external identity.
    pub uuid: Uuid,

    pub name: String,
    pub description: String,

    pub owner: Option<Participant>,
    pub subcontractors: Vec<Participant>,

    status: ContractStatus,
}

impl Contract {
    pub fn new(id: EntityId, uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            uuid,
            name: name.into(),
            description: String::new(),
            owner: None,
            subcontractors: Vec::new(),
            status: ContractStatus::Uninitialized,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: Participant) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub fn with_subcontractor(mut self, participant: Participant) -> Self {
        self.subcontractors.push(participant);
        self
    }

    #[must_use]
    pub fn status(&self) -> ContractStatus {
        self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `participant` owns this contract.
    #[must_use]
    pub fn is_owned_by(&self, participant: ParticipantId) -> bool {
        self.owner.as_ref().is_some_and(|o| o.id == participant)
    }

    /// Whether `participant` is one of the subcontractors.
    #[must_use]
    pub fn has_subcontractor(&self, participant: ParticipantId) -> bool {
        self.subcontractors.iter().any(|s| s.id == participant)
    }

    /// Raw status write. Legality is checked by the caller.
    pub(crate) fn set_status(&mut self, status: ContractStatus) {
        self.status = status;
    }
}
