//! FIFO lot matching
//!
//! Turns a chronological transaction list into the open cost-basis lots of
//! every holding. Purchases open lots; redemptions consume the oldest lots
//! first, splitting the last one they touch.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use core_kernel::HoldingKey;

use crate::error::PortfolioError;
use crate::lot::{Lot, LotQueue};
use crate::transaction::{Transaction, TransactionKind};

/// Open lots for every holding seen, keyed by holding
///
/// A holding stays in the book after all its lots are consumed, so fully
/// redeemed positions are still visible (with zero units).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotBook {
    queues: BTreeMap<HoldingKey, LotQueue>,
}

impl LotBook {
    /// Creates an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one transaction to the book
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InsufficientLots` when a redemption exceeds
    /// the open units of its holding. The available lots are consumed
    /// before the error is returned. Returns `PortfolioError::Overflow` when
    /// a purchase would push the holding's open units out of range.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<(), PortfolioError> {
        match transaction.kind() {
            TransactionKind::Purchase => {
                let queue = self.queue_mut(&transaction.holding);
                if queue.total_units().checked_add(transaction.units).is_none() {
                    return Err(PortfolioError::Overflow {
                        holding: transaction.holding.clone(),
                    });
                }
                queue.append(Lot::new(transaction.date, transaction.units, transaction.price));
            }
            TransactionKind::Redemption => {
                let requested = transaction.units.abs();
                let shortfall = self.queue_mut(&transaction.holding).consume(requested);
                if shortfall > Decimal::ZERO {
                    return Err(PortfolioError::InsufficientLots {
                        holding: transaction.holding.clone(),
                        requested,
                        shortfall,
                    });
                }
            }
            TransactionKind::NoOp => {
                debug!(
                    sequence = transaction.sequence,
                    holding = %transaction.holding,
                    "Zero-unit transaction ignored"
                );
            }
        }
        Ok(())
    }

    /// Returns the lot queue of a holding
    pub fn queue(&self, holding: &HoldingKey) -> Option<&LotQueue> {
        self.queues.get(holding)
    }

    /// Iterates holdings in key order
    pub fn holdings(&self) -> impl Iterator<Item = (&HoldingKey, &LotQueue)> {
        self.queues.iter()
    }

    /// Number of holdings seen
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    fn queue_mut(&mut self, holding: &HoldingKey) -> &mut LotQueue {
        self.queues.entry(holding.clone()).or_default()
    }
}

/// Runs FIFO matching over transactions already in chronological order
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::HoldingKey;
/// use domain_portfolio::{match_lots, Transaction};
/// use rust_decimal_macros::dec;
///
/// let holding = HoldingKey::parse("INF000000001", "1").unwrap();
/// let buy = Transaction {
///     sequence: 0,
///     holding: holding.clone(),
///     units: dec!(100),
///     price: dec!(10),
///     date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     amount: dec!(1000),
/// };
/// let sell = Transaction {
///     sequence: 1,
///     units: dec!(-40),
///     amount: dec!(-480),
///     date: NaiveDate::from_ymd_opt(2023, 4, 11).unwrap(),
///     ..buy.clone()
/// };
///
/// let book = match_lots(&[buy, sell]).unwrap();
/// assert_eq!(book.queue(&holding).unwrap().total_units(), dec!(60));
/// ```
#[instrument(skip_all, fields(transactions = transactions.len()))]
pub fn match_lots(transactions: &[Transaction]) -> Result<LotBook, PortfolioError> {
    let mut book = LotBook::new();

    for transaction in transactions {
        book.apply(transaction)?;
    }

    debug!(holdings = book.len(), "Lots matched");
    Ok(book)
}
