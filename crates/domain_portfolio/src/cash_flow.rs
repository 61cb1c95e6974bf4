//! Dated cash flows for return calculations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// A signed, dated cash flow from the investor's point of view
///
/// Contributions are negative; redemptions and the terminal value are
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// Builds the cash-flow series for a list of transactions
///
/// Each transaction contributes `-amount` on its date, in list order. The
/// liquidation value of the portfolio at `as_of` is appended last. The
/// result must not be reordered: discounting is measured from the first
/// flow.
pub fn build_cash_flows(
    transactions: &[Transaction],
    as_of: NaiveDate,
    terminal_value: Decimal,
) -> Vec<CashFlow> {
    transactions
        .iter()
        .map(|t| CashFlow::new(t.date, -t.amount))
        .chain(std::iter::once(CashFlow::new(as_of, terminal_value)))
        .collect()
}
