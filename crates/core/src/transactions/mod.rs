//! Transaction input model and normalizer.
//!
//! Raw rows arrive loosely typed (form entry, spreadsheet import) and are
//! coerced into canonical [`Transaction`] records before the ledger replay.

pub mod transactions_model;
pub mod transactions_normalizer;

pub use transactions_model::*;
pub use transactions_normalizer::*;
