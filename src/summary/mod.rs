//! Participant-facing contract listings.
//!
//! Builds the data a contracts screen needs for one viewer. Rendering is the
//! host's business; this only decides what is listed and how the viewer
//! relates to each contract.

mod listing;

pub use listing::{contract_listings, ContractListing, GroupListing, ViewerRole, INACTIVE_OWNER};
