//! Cost-basis lots and per-holding lot queues

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A batch of units bought together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    date: NaiveDate,
    units: Decimal,
    price: Decimal,
}

impl Lot {
    /// Creates a new lot
    pub fn new(date: NaiveDate, units: Decimal, price: Decimal) -> Self {
        Self { date, units, price }
    }

    /// Purchase date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Units still open in this lot
    pub fn units(&self) -> Decimal {
        self.units
    }

    /// Price per unit at purchase
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Acquisition cost of the open units; `None` on overflow
    pub fn cost(&self) -> Option<Decimal> {
        self.units.checked_mul(self.price)
    }
}

/// Open lots of one holding, oldest first
///
/// # Invariants
///
/// - Every lot in the queue has units > 0
/// - Lots are consumed strictly from the front
/// - The sum of open units is representable (`LotBook` rejects purchases
///   that would break this)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LotQueue {
    lots: VecDeque<Lot>,
}

impl LotQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a newly purchased lot; lots without positive units are ignored
    pub fn append(&mut self, lot: Lot) {
        if lot.units > Decimal::ZERO {
            self.lots.push_back(lot);
        }
    }

    /// Returns the oldest open lot
    pub fn peek_oldest(&self) -> Option<&Lot> {
        self.lots.front()
    }

    /// Removes and returns the oldest open lot
    pub fn pop_oldest(&mut self) -> Option<Lot> {
        self.lots.pop_front()
    }

    /// Redeems `units` from the oldest lots first
    ///
    /// Whole lots are removed while they fit in the remaining quantity; the
    /// next lot is then reduced in place. Returns the quantity that could not
    /// be matched because the queue ran out (zero when fully covered).
    pub fn consume(&mut self, units: Decimal) -> Decimal {
        let mut remaining = units.abs();

        while remaining > Decimal::ZERO {
            let Some(oldest) = self.lots.front_mut() else {
                break;
            };

            if oldest.units <= remaining {
                remaining -= oldest.units;
                self.lots.pop_front();
            } else {
                oldest.units -= remaining;
                remaining = Decimal::ZERO;
            }
        }

        remaining
    }

    /// Total open units across all lots
    pub fn total_units(&self) -> Decimal {
        self.lots.iter().map(|l| l.units).sum()
    }

    /// Total acquisition cost of the open units; `None` on overflow
    pub fn acquisition_cost(&self) -> Option<Decimal> {
        self.lots
            .iter()
            .try_fold(Decimal::ZERO, |total, lot| total.checked_add(lot.cost()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter()
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    #[test]
    fn test_append_ignores_empty_lot() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), dec!(0), dec!(10)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_partial_consume_reduces_front_in_place() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), dec!(100), dec!(10)));
        queue.append(Lot::new(day(2), dec!(50), dec!(12)));

        let shortfall = queue.consume(dec!(-40));

        assert_eq!(shortfall, dec!(0));
        assert_eq!(queue.peek_oldest().unwrap().units(), dec!(60));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_consume_beyond_queue_reports_shortfall() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), dec!(10), dec!(10)));

        assert_eq!(queue.consume(dec!(25)), dec!(15));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_oldest_returns_front() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), dec!(1), dec!(10)));
        queue.append(Lot::new(day(2), dec!(2), dec!(11)));

        assert_eq!(queue.pop_oldest().unwrap().date(), day(1));
        assert_eq!(queue.peek_oldest().unwrap().date(), day(2));
    }

    #[test]
    fn test_cost_and_units() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), dec!(2.5), dec!(10)));
        queue.append(Lot::new(day(2), dec!(1.5), dec!(20)));

        assert_eq!(queue.total_units(), dec!(4.0));
        assert_eq!(queue.acquisition_cost(), Some(dec!(55.0)));
    }

    #[test]
    fn test_acquisition_cost_overflow_is_none() {
        let mut queue = LotQueue::new();
        queue.append(Lot::new(day(1), Decimal::MAX, dec!(2)));

        assert_eq!(queue.peek_oldest().unwrap().cost(), None);
        assert_eq!(queue.acquisition_cost(), None);
    }
}
