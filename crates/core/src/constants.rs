use rust_decimal::Decimal;
use std::str::FromStr;

/// Quantity threshold below which a quantity is treated as zero.
///
/// Repeated fractional-share arithmetic accumulates drift; every comparison
/// against zero in the engine goes through this tolerance.
pub const QUANTITY_THRESHOLD: &str = "0.000001";

/// Decimal precision for serialized valuation figures.
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Category assigned to transactions that carry none.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Annualization base for fixed-income compounding (Brazilian business-day
/// convention). Elapsed time is counted in calendar days but compounded over
/// this base; the mismatch matches the market convention for CDB/Tesouro
/// pricing.
pub const BUSINESS_DAYS_PER_YEAR: u32 = 252;

/// The quantity tolerance as a `Decimal`.
pub fn quantity_threshold() -> Decimal {
    Decimal::from_str(QUANTITY_THRESHOLD).unwrap_or_else(|_| Decimal::new(1, 6))
}

/// Returns true when `quantity` is large enough to matter.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    quantity.abs() >= quantity_threshold()
}
