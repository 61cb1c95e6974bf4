//! Buy and sell transactions

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::HoldingKey;

/// A transaction as read from a statement, before its date is parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Holding the transaction belongs to
    pub holding: HoldingKey,
    /// Units (positive for purchases, negative for redemptions)
    pub units: Decimal,
    /// Purchase price per unit
    pub price: Decimal,
    /// Raw trade date (`DD-Mon-YYYY`)
    pub trade_date: String,
    /// Cash effect of the transaction
    pub amount: Decimal,
}

impl TransactionRecord {
    /// Creates a new transaction record
    pub fn new(
        holding: HoldingKey,
        units: Decimal,
        price: Decimal,
        trade_date: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            holding,
            units,
            price,
            trade_date: trade_date.into(),
            amount,
        }
    }
}

/// What a transaction does to the lot queue of its holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Units bought; opens a new lot
    Purchase,
    /// Units sold; consumes the oldest lots first
    Redemption,
    /// Zero units; no effect on lots
    NoOp,
}

/// A dated transaction ready for lot matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Position of the record in the statement
    pub sequence: usize,
    pub holding: HoldingKey,
    pub units: Decimal,
    pub price: Decimal,
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Transaction {
    /// Builds a dated transaction from a record
    pub fn from_record(sequence: usize, record: &TransactionRecord, date: NaiveDate) -> Self {
        Self {
            sequence,
            holding: record.holding.clone(),
            units: record.units,
            price: record.price,
            date,
            amount: record.amount,
        }
    }

    /// Classifies the transaction by the sign of its units
    pub fn kind(&self) -> TransactionKind {
        if self.units > Decimal::ZERO {
            TransactionKind::Purchase
        } else if self.units < Decimal::ZERO {
            TransactionKind::Redemption
        } else {
            TransactionKind::NoOp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transaction(units: Decimal) -> Transaction {
        Transaction {
            sequence: 0,
            holding: HoldingKey::parse("INF000000001", "1").unwrap(),
            units,
            price: dec!(10),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            amount: units * dec!(10),
        }
    }

    #[test]
    fn test_kind_follows_unit_sign() {
        assert_eq!(transaction(dec!(5)).kind(), TransactionKind::Purchase);
        assert_eq!(transaction(dec!(-5)).kind(), TransactionKind::Redemption);
        assert_eq!(transaction(dec!(0)).kind(), TransactionKind::NoOp);
    }
}
