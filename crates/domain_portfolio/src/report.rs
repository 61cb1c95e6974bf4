//! End-to-end portfolio evaluation
//!
//! Wires the components together:
//! records → dated, ordered transactions → FIFO lots → valuation →
//! cash flows → XIRR.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::cash_flow::{build_cash_flows, CashFlow};
use crate::chronology::{prepare_transactions, RecordPolicy};
use crate::diagnostics::Diagnostics;
use crate::error::PortfolioError;
use crate::fifo::match_lots;
use crate::transaction::TransactionRecord;
use crate::valuation::{value_portfolio, HoldingValuation, ValuationSnapshot};
use crate::xirr::{XirrMethod, XirrSolver};

/// Settings for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOptions {
    /// Date of the terminal (liquidation) cash flow
    pub as_of: NaiveDate,
    pub record_policy: RecordPolicy,
    pub solver: XirrSolver,
}

impl EvaluationOptions {
    /// Default options valuing the portfolio at `as_of`
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            record_policy: RecordPolicy::default(),
            solver: XirrSolver::default(),
        }
    }

    pub fn with_record_policy(mut self, policy: RecordPolicy) -> Self {
        self.record_policy = policy;
        self
    }

    pub fn with_solver(mut self, solver: XirrSolver) -> Self {
        self.solver = solver;
        self
    }
}

/// Result of evaluating a portfolio
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub as_of: NaiveDate,
    pub total_value: Decimal,
    /// Unrealized gain on open lots
    pub total_gain: Decimal,
    /// Annualized money-weighted return as a decimal fraction
    pub xirr: f64,
    pub xirr_method: XirrMethod,
    pub holdings: Vec<HoldingValuation>,
    pub cash_flows: Vec<CashFlow>,
    pub diagnostics: Diagnostics,
}

impl PortfolioReport {
    /// Number of records left out because their date did not parse
    pub fn skipped_records(&self) -> usize {
        self.diagnostics.skipped_records()
    }
}

/// Evaluates a portfolio from statement records and a NAV snapshot
///
/// # Errors
///
/// - `PortfolioError::MalformedDate` under `RecordPolicy::Abort`
/// - `PortfolioError::InsufficientLots` when a holding is oversold
/// - `PortfolioError::Overflow` when amounts leave the `Decimal` range
/// - `PortfolioError::Xirr` when no annualized return can be computed
#[instrument(skip_all, fields(records = records.len(), as_of = %options.as_of))]
pub fn evaluate(
    records: &[TransactionRecord],
    snapshot: &ValuationSnapshot,
    options: &EvaluationOptions,
) -> Result<PortfolioReport, PortfolioError> {
    let mut diagnostics = Diagnostics::new();

    let transactions = prepare_transactions(records, options.record_policy, &mut diagnostics)?;
    let book = match_lots(&transactions)?;
    let valuation = value_portfolio(&book, snapshot, &mut diagnostics)?;

    let cash_flows = build_cash_flows(&transactions, options.as_of, valuation.total_value);
    let xirr = options.solver.solve(&cash_flows)?;

    info!(
        total_value = %valuation.total_value,
        total_gain = %valuation.total_gain,
        xirr = xirr.rate,
        skipped = diagnostics.skipped_records(),
        warnings = diagnostics.len(),
        "Portfolio evaluated"
    );

    Ok(PortfolioReport {
        as_of: options.as_of,
        total_value: valuation.total_value,
        total_gain: valuation.total_gain,
        xirr: xirr.rate,
        xirr_method: xirr.method,
        holdings: valuation.holdings,
        cash_flows,
        diagnostics,
    })
}
