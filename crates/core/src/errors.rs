//! Core error types for the portfolio engine.
//!
//! The ledger replay itself never fails: malformed rows are dropped by the
//! normalizer and numeric degeneracies short-circuit to zero. Errors surface
//! only from input parsing helpers and the fixed-income registry.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date '{0}'")]
    DateParse(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Fixed-income instrument not found: {0}")]
    InstrumentNotFound(String),

    #[error("Fixed-income instrument {0} is already redeemed")]
    AlreadyRedeemed(String),
}
