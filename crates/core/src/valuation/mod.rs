//! Position valuation against a current-price map.
//!
//! Pure functions of `(&LedgerState, &PriceMap)`; a missing price values the
//! position at zero rather than failing.

pub mod valuation_calculator;
pub mod valuation_model;

pub use valuation_calculator::*;
pub use valuation_model::*;
