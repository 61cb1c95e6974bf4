//! Portfolio Domain
//!
//! This crate computes portfolio valuation metrics from buy/sell
//! transactions and a NAV snapshot: current value, unrealized gain, and the
//! money-weighted annualized return (XIRR).
//!
//! # Key Concepts
//!
//! - **Holding**: a security (ISIN) within one account (folio)
//! - **Lot**: units bought together, keeping their own date and price
//! - **FIFO matching**: redemptions consume the oldest lots first
//! - **NAV**: current price per unit used for valuation
//! - **XIRR**: internal rate of return for irregularly dated cash flows
//!
//! # Pipeline
//!
//! 1. [`prepare_transactions`] parses trade dates and sorts by date
//! 2. [`match_lots`] builds open lots per holding
//! 3. [`value_portfolio`] values open lots against the snapshot
//! 4. [`build_cash_flows`] derives the cash-flow series
//! 5. [`XirrSolver::solve`] finds the annualized return
//!
//! [`evaluate`] runs all five steps.

pub mod transaction;
pub mod chronology;
pub mod lot;
pub mod fifo;
pub mod valuation;
pub mod cash_flow;
pub mod xirr;
pub mod diagnostics;
pub mod report;
pub mod error;

pub use transaction::{Transaction, TransactionKind, TransactionRecord};
pub use chronology::{prepare_transactions, RecordPolicy};
pub use lot::{Lot, LotQueue};
pub use fifo::{match_lots, LotBook};
pub use valuation::{
    value_holding, value_portfolio, HoldingValuation, PortfolioValuation, SnapshotEntry,
    ValuationSnapshot,
};
pub use cash_flow::{build_cash_flows, CashFlow};
pub use xirr::{net_present_value, XirrError, XirrMethod, XirrSolution, XirrSolver};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use report::{evaluate, EvaluationOptions, PortfolioReport};
pub use error::PortfolioError;

use rust_decimal::Decimal;

/// Calculates the value of units at a given NAV; `None` on overflow
///
/// # Example
///
/// ```rust
/// use domain_portfolio::calculate_value;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(calculate_value(dec!(60), dec!(12)), Some(dec!(720)));
/// ```
pub fn calculate_value(units: Decimal, nav: Decimal) -> Option<Decimal> {
    units.checked_mul(nav)
}
