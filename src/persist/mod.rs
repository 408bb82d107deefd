//! Flat-file persistence.
//!
//! Three whitespace-delimited record files (users, products, orders) are
//! overwritten whole on save; the history log is append-only and is only ever
//! parsed back for its `Order ID: {n}` prefixes. A missing file always reads
//! as an empty collection.

pub mod history;
pub mod records;

pub use history::*;
pub use records::*;
