//! Engine notifications.
//!
//! Every notification the engine raises (status changes, criteria updates,
//! setup, start-ticking, group fulfillment, effect dispatch) is recorded in
//! the world's [`EventJournal`] in the order it was raised.

mod event;
mod journal;

pub use event::ContractEvent;
pub use journal::EventJournal;
