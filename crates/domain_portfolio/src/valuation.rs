//! Portfolio valuation against a NAV snapshot
//!
//! Only open lots are valued, so the reported gain is the unrealized gain on
//! units still held. Gains realized on redeemed units are not included.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::HoldingKey;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::PortfolioError;
use crate::fifo::LotBook;
use crate::lot::{Lot, LotQueue};
use crate::calculate_value;

/// Current NAV of one holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub holding: HoldingKey,
    pub nav: Decimal,
}

impl SnapshotEntry {
    pub fn new(holding: HoldingKey, nav: Decimal) -> Self {
        Self { holding, nav }
    }
}

/// NAV per holding at valuation time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuationSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl ValuationSnapshot {
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: SnapshotEntry) {
        self.entries.push(entry);
    }

    /// NAV of a holding; the first matching entry wins
    pub fn nav_for(&self, holding: &HoldingKey) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| &e.holding == holding)
            .map(|e| e.nav)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SnapshotEntry> for ValuationSnapshot {
    fn from_iter<I: IntoIterator<Item = SnapshotEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Valuation of one holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub holding: HoldingKey,
    /// Open units across all lots
    pub units: Decimal,
    /// NAV used (zero when the snapshot had none)
    pub nav: Decimal,
    pub current_value: Decimal,
    pub acquisition_cost: Decimal,
    /// Unrealized gain on the open units
    pub gain: Decimal,
    /// Open lots, oldest first
    pub lots: Vec<Lot>,
}

/// Aggregate valuation across holdings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub total_value: Decimal,
    pub total_gain: Decimal,
    pub holdings: Vec<HoldingValuation>,
}

/// Values the open lots of one holding at `nav`
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` when the value, cost, or gain does not
/// fit in a `Decimal`.
pub fn value_holding(
    holding: &HoldingKey,
    queue: &LotQueue,
    nav: Decimal,
) -> Result<HoldingValuation, PortfolioError> {
    let overflow = || PortfolioError::Overflow { holding: holding.clone() };

    let units = queue.total_units();
    let current_value = calculate_value(units, nav).ok_or_else(overflow)?;
    let acquisition_cost = queue.acquisition_cost().ok_or_else(overflow)?;
    let gain = current_value
        .checked_sub(acquisition_cost)
        .ok_or_else(overflow)?;

    Ok(HoldingValuation {
        holding: holding.clone(),
        units,
        nav,
        current_value,
        acquisition_cost,
        gain,
        lots: queue.iter().cloned().collect(),
    })
}

/// Values every holding in the book and sums the results
///
/// A holding with open units but no snapshot entry is valued at a NAV of
/// zero and reported as `Diagnostic::MissingNav`.
///
/// # Errors
///
/// Returns `PortfolioError::Overflow` naming the first holding whose
/// valuation, or whose contribution to the totals, overflows.
#[instrument(skip_all, fields(holdings = book.len(), snapshot = snapshot.len()))]
pub fn value_portfolio(
    book: &LotBook,
    snapshot: &ValuationSnapshot,
    diagnostics: &mut Diagnostics,
) -> Result<PortfolioValuation, PortfolioError> {
    let mut valuation = PortfolioValuation::default();

    for (holding, queue) in book.holdings() {
        let nav = match snapshot.nav_for(holding) {
            Some(nav) => nav,
            None => {
                if !queue.is_empty() {
                    diagnostics.push(Diagnostic::MissingNav {
                        holding: holding.clone(),
                    });
                }
                Decimal::ZERO
            }
        };

        let holding_valuation = value_holding(holding, queue, nav)?;
        debug!(
            holding = %holding,
            units = %holding_valuation.units,
            value = %holding_valuation.current_value,
            gain = %holding_valuation.gain,
            "Holding valued"
        );

        let overflow = || PortfolioError::Overflow { holding: holding.clone() };
        valuation.total_value = valuation
            .total_value
            .checked_add(holding_valuation.current_value)
            .ok_or_else(overflow)?;
        valuation.total_gain = valuation
            .total_gain
            .checked_add(holding_valuation.gain)
            .ok_or_else(overflow)?;
        valuation.holdings.push(holding_valuation);
    }

    Ok(valuation)
}
