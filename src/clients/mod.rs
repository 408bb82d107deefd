//! Client handles for the resource actors.
//!
//! Clients are cheap to clone and are the only way the rest of the program
//! talks to the actors. Flows that span more than one resource (placing an
//! order, finalizing payment, syncing history) are orchestrated here so the
//! actors themselves never call each other.

pub mod account_client;
pub mod catalog_client;
pub mod ledger_client;

pub mod macros;

pub use account_client::*;
pub use catalog_client::*;
pub use ledger_client::*;
