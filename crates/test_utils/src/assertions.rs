//! Custom Test Assertions
//!
//! Approximate comparisons with messages that show both sides and the gap.

use rust_decimal::Decimal;

/// Asserts that two decimal amounts differ by at most `tolerance`
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that two rates differ by at most `tolerance`
pub fn assert_rate_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Rates differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}
