//! Group satisfaction.
//!
//! Pure quantifier evaluation over a group's satisfied flags. The world runs
//! this once per unfulfilled group on every criteria update.

use crate::core::CriteriaMode;

/// Result of evaluating one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupOutcome {
    /// No criteria: neither satisfied nor failed.
    Inert,
    Unsatisfied,
    Satisfied,
}

impl GroupOutcome {
    #[must_use]
    pub fn is_satisfied(self) -> bool {
        self == Self::Satisfied
    }
}

/// Evaluate a group's flags under `mode`, in order.
///
/// ANY short-circuits at the first satisfied flag. An empty group is
/// [`GroupOutcome::Inert`] regardless of mode.
pub fn evaluate_group<I>(mode: CriteriaMode, flags: I) -> GroupOutcome
where
    I: IntoIterator<Item = bool>,
{
    let mut flags = flags.into_iter().peekable();
    if flags.peek().is_none() {
        return GroupOutcome::Inert;
    }

    let satisfied = match mode {
        CriteriaMode::All => flags.all(|f| f),
        CriteriaMode::Any => flags.any(|f| f),
    };

    if satisfied {
        GroupOutcome::Satisfied
    } else {
        GroupOutcome::Unsatisfied
    }
}
