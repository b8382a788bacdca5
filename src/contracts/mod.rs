//! Contracts and their lifecycle status.

mod contract;
mod status;

pub use contract::{Contract, Participant, ParticipantId};
pub use status::{ContractStatus, StatusTransition};
