//! Test Data Builders
//!
//! Builders for statement records and NAV snapshots with sensible defaults,
//! so tests only spell out the fields they care about.

use chrono::NaiveDate;
use core_kernel::HoldingKey;
use domain_portfolio::{SnapshotEntry, TransactionRecord, ValuationSnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, HoldingFixtures};

/// Builder for a single `TransactionRecord`
///
/// Defaults to a purchase of 100 units at 10 on 1 Jan 2023 in the large cap
/// holding. The amount follows `units × price` unless set explicitly.
#[derive(Debug, Clone)]
pub struct TransactionRecordBuilder {
    holding: HoldingKey,
    units: Decimal,
    price: Decimal,
    trade_date: String,
    amount: Option<Decimal>,
}

impl Default for TransactionRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionRecordBuilder {
    pub fn new() -> Self {
        Self {
            holding: HoldingFixtures::large_cap(),
            units: dec!(100),
            price: dec!(10),
            trade_date: DateFixtures::statement_format(DateFixtures::first_trade()),
            amount: None,
        }
    }

    /// Purchase of `units` at `price`
    pub fn purchase(units: Decimal, price: Decimal) -> Self {
        Self::new().with_units(units).with_price(price)
    }

    /// Redemption of `units` (positive) for `proceeds`
    pub fn redemption(units: Decimal, proceeds: Decimal) -> Self {
        Self::new()
            .with_units(-units)
            .with_price(Decimal::ZERO)
            .with_amount(-proceeds)
    }

    pub fn with_holding(mut self, holding: HoldingKey) -> Self {
        self.holding = holding;
        self
    }

    pub fn with_units(mut self, units: Decimal) -> Self {
        self.units = units;
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.trade_date = DateFixtures::statement_format(date);
        self
    }

    /// Sets the raw date text, for malformed-date cases
    pub fn with_raw_date(mut self, text: impl Into<String>) -> Self {
        self.trade_date = text.into();
        self
    }

    pub fn build(self) -> TransactionRecord {
        let amount = self.amount.unwrap_or(self.units * self.price);
        TransactionRecord::new(self.holding, self.units, self.price, self.trade_date, amount)
    }
}

/// Builder for a `ValuationSnapshot`
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nav(mut self, holding: HoldingKey, nav: Decimal) -> Self {
        self.entries.push(SnapshotEntry::new(holding, nav));
        self
    }

    pub fn build(self) -> ValuationSnapshot {
        ValuationSnapshot::new(self.entries)
    }
}
