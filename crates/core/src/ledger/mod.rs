//! FIFO lot ledger - the central replay state machine.
//!
//! The ledger is a pure function of the transaction list: replaying the same
//! ordered input always reproduces identical asset books, history and closed
//! trades. There is no incremental update mode; any change to the transaction
//! set triggers a full re-replay.

pub mod ledger_calculator;
pub mod ledger_model;

pub use ledger_calculator::*;
pub use ledger_model::*;
