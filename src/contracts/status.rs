//! Contract status state machine.
//!
//! ```text
//! Uninitialized -> Initiating -> Active -> Finalized
//!                                       \-> Breached
//! ```
//!
//! Finalized and Breached are terminal. Every other pair is illegal.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractStatus {
    #[default]
    Uninitialized,
    /// Criteria are being spawned.
    Initiating,
    /// Criteria are ticking and evaluated on every update.
    Active,
    Finalized,
    Breached,
}

impl ContractStatus {
    /// Whether `self -> next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: ContractStatus) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Initiating)
                | (Self::Initiating, Self::Active)
                | (Self::Active, Self::Finalized)
                | (Self::Active, Self::Breached)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finalized | Self::Breached)
    }

    /// Criteria may still be added in this status.
    #[must_use]
    pub const fn accepts_criteria(self) -> bool {
        matches!(self, Self::Uninitialized | Self::Initiating)
    }

    /// Position along the lifecycle path. Both terminal states share a rank.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Initiating => 1,
            Self::Active => 2,
            Self::Finalized | Self::Breached => 3,
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "Uninitialized",
            Self::Initiating => "Initiating",
            Self::Active => "Active",
            Self::Finalized => "Finalized",
            Self::Breached => "Breached",
        };
        f.write_str(name)
    }
}

/// A status change, as observed by the lifecycle controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: ContractStatus,
    pub to: ContractStatus,
}

impl StatusTransition {
    #[must_use]
    pub const fn new(from: ContractStatus, to: ContractStatus) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn is_legal(self) -> bool {
        self.from.can_transition_to(self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ContractStatus; 5] = [
        ContractStatus::Uninitialized,
        ContractStatus::Initiating,
        ContractStatus::Active,
        ContractStatus::Finalized,
        ContractStatus::Breached,
    ];

    #[test]
    fn test_legal_transitions() {
        use ContractStatus::*;

        let legal: Vec<_> = ALL
            .iter()
            .flat_map(|&from| ALL.iter().map(move |&to| (from, to)))
            .filter(|&(from, to)| from.can_transition_to(to))
            .collect();

        assert_eq!(
            legal,
            vec![
                (Uninitialized, Initiating),
                (Initiating, Active),
                (Active, Finalized),
                (Active, Breached),
            ]
        );
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for to in ALL {
            assert!(!ContractStatus::Finalized.can_transition_to(to));
            assert!(!ContractStatus::Breached.can_transition_to(to));
        }
    }

    #[test]
    fn test_legal_transitions_increase_rank() {
        for from in ALL {
            for to in ALL {
                if from.can_transition_to(to) {
                    assert_eq!(to.rank(), from.rank() + 1);
                }
            }
        }
    }

    #[test]
    fn test_accepts_criteria() {
        assert!(ContractStatus::Uninitialized.accepts_criteria());
        assert!(ContractStatus::Initiating.accepts_criteria());
        assert!(!ContractStatus::Active.accepts_criteria());
        assert!(!ContractStatus::Breached.accepts_criteria());
    }

    #[test]
    fn test_transition_legality() {
        let skip = StatusTransition::new(ContractStatus::Uninitialized, ContractStatus::Active);
        assert!(!skip.is_legal());
        let finalize = StatusTransition::new(ContractStatus::Active, ContractStatus::Finalized);
        assert!(finalize.is_legal());
    }
}
