//! Trade date handling
//!
//! Statement dates arrive as `DD-Mon-YYYY` strings (e.g. `05-Jan-2023`).
//! This module turns them into calendar dates and provides the actual/365
//! day count used when discounting cash flows.

use chrono::NaiveDate;
use thiserror::Error;

/// Format of transaction dates in statements (`05-Jan-2023`)
pub const TRADE_DATE_FORMAT: &str = "%d-%b-%Y";

/// Day-count denominator for annualising
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unparseable trade date '{input}', expected DD-Mon-YYYY")]
    UnparseableDate { input: String },
}

/// Parses a statement trade date
///
/// Only the `DD-Mon-YYYY` form is accepted. The month abbreviation is
/// case-insensitive and surrounding whitespace is ignored.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::parse_trade_date;
///
/// let date = parse_trade_date("05-Jan-2023").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
/// assert!(parse_trade_date("2023-01-05").is_err());
/// ```
pub fn parse_trade_date(input: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(input.trim(), TRADE_DATE_FORMAT).map_err(|_| {
        TemporalError::UnparseableDate {
            input: input.to_string(),
        }
    })
}

/// Signed number of years between two dates on an actual/365 basis
pub fn year_fraction(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase_month() {
        let date = parse_trade_date("15-mar-2021").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
    }

    #[test]
    fn test_year_fraction_is_signed() {
        let a = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(year_fraction(a, b), 1.0);
        assert_eq!(year_fraction(b, a), -1.0);
    }
}
