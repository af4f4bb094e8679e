//! Ratio and summation helpers shared by the engine and the aggregator.
//!
//! RULE: every ratio in the calculator goes through `ratio` or
//! `safe_divide`. A non-positive denominator never produces NaN or
//! infinity; the call site decides what to report instead.

/// `numerator / denominator`, or `None` when the denominator is not
/// strictly positive.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is not
/// strictly positive.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    ratio(numerator, denominator).unwrap_or(fallback)
}

/// `numerator` as a percentage of `denominator`, 0 when undefined.
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    safe_divide(numerator, denominator, 0.0) * 100.0
}

/// Sum in a canonical order so the result does not depend on the order
/// the terms arrive in.
pub fn stable_sum<I>(terms: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut terms: Vec<f64> = terms.into_iter().collect();
    terms.sort_by(f64::total_cmp);
    terms.into_iter().fold(0.0, |acc, t| acc + t)
}
