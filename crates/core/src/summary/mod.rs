//! Top-level portfolio summary aggregation.
//!
//! External totals (fixed-income value, dividend income) arrive as explicit
//! parameters; the aggregator never reaches into ambient registries.

pub mod summary_model;
pub mod summary_service;

pub use summary_model::*;
pub use summary_service::*;
