//! Shared primitive types used across the calculator.

/// A stable, unique identifier for a catalog entry.
pub type ProductId = String;

/// An amount in the seller's local currency (INR).
pub type Inr = f64;

/// A percentage on the 0-100 scale.
pub type Percent = f64;

/// Days used to convert a monthly rate into days of cover.
pub const DAYS_PER_MONTH: f64 = 30.0;
