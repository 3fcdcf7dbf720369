//! Fixed-income accrual: day count, 252-base compounding and the regressive
//! IR/IOF withholding tables, plus an in-memory instrument registry.
//!
//! Entirely independent of the FIFO ledger.

pub mod accrual;
pub mod fixed_income_model;
pub mod fixed_income_service;

pub use accrual::*;
pub use fixed_income_model::*;
pub use fixed_income_service::*;

#[cfg(test)]
mod accrual_tests;

#[cfg(test)]
mod fixed_income_service_tests;
