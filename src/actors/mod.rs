//! The resource actors. Each actor is the sole owner of one in-memory
//! collection and serves typed requests over an mpsc channel; the pure
//! collection logic lives in a state struct the actor wraps.

pub mod accounts;
pub mod catalog;
pub mod ledger;

pub use accounts::*;
pub use catalog::*;
pub use ledger::*;
