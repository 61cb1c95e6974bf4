//! Pre-built Test Fixtures
//!
//! The holdings and dates here match `fixtures/transaction_detail.json`.

use std::path::PathBuf;

use chrono::NaiveDate;
use core_kernel::HoldingKey;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Holdings used across tests
pub struct HoldingFixtures;

impl HoldingFixtures {
    /// Large cap holding, folio 1001
    pub fn large_cap() -> HoldingKey {
        HoldingKey::parse("INF179K01BE2", "1001").unwrap()
    }

    /// Flexi cap holding, folio 2002
    pub fn flexi_cap() -> HoldingKey {
        HoldingKey::parse("INF209K01YN0", "2002").unwrap()
    }

    /// Same ISIN as `large_cap` under a different folio
    pub fn large_cap_second_folio() -> HoldingKey {
        HoldingKey::parse("INF179K01BE2", "3003").unwrap()
    }
}

/// Dates used across tests
pub struct DateFixtures;

impl DateFixtures {
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// First trade in the sample statement
    pub fn first_trade() -> NaiveDate {
        Self::ymd(2023, 1, 1)
    }

    /// Valuation date the sample statement's expectations assume
    pub fn valuation_date() -> NaiveDate {
        Self::ymd(2024, 1, 1)
    }

    /// Formats a date the way statements do, e.g. `01-Jan-2023`
    pub fn statement_format(date: NaiveDate) -> String {
        date.format(core_kernel::TRADE_DATE_FORMAT).to_string()
    }
}

/// The sample statement and the figures it produces
pub struct StatementFixtures;

impl StatementFixtures {
    pub fn transaction_detail_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("transaction_detail.json")
    }

    pub fn transaction_detail_json() -> &'static str {
        include_str!("../fixtures/transaction_detail.json")
    }

    /// 60 units at 12 plus 40 units at 30.5
    pub fn expected_total_value() -> Decimal {
        dec!(1940)
    }

    /// 60 × (12 − 10) plus 40 × (30.5 − 25)
    pub fn expected_total_gain() -> Decimal {
        dec!(340)
    }

    /// The row dated `2023/06/01`
    pub fn expected_skipped_records() -> usize {
        1
    }
}
