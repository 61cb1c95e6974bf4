//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating statement data that keeps
//! the portfolio invariants: no holding is ever sold below zero units.

use chrono::{Duration, NaiveDate};
use core_kernel::HoldingKey;
use domain_portfolio::TransactionRecord;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, HoldingFixtures};

/// Strategy for positive unit counts with up to three decimal places
pub fn units_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|n| Decimal::new(n, 3))
}

/// Strategy for NAV values (1.00 to 1000.00)
pub fn nav_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for trade dates in 2023
pub fn trade_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..365i64).prop_map(|days| DateFixtures::ymd(2023, 1, 1) + Duration::days(days))
}

/// Strategy for one of the fixture holdings
pub fn holding_strategy() -> impl Strategy<Value = HoldingKey> {
    prop_oneof![
        Just(HoldingFixtures::large_cap()),
        Just(HoldingFixtures::flexi_cap()),
        Just(HoldingFixtures::large_cap_second_folio()),
    ]
}

/// Strategy for dated records, in chronological order, that never oversell
///
/// Each step is a purchase or a redemption of a fraction of the units the
/// holding has open at that point.
pub fn record_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<TransactionRecord>> {
    proptest::collection::vec(
        (holding_strategy(), units_strategy(), nav_strategy(), any::<bool>(), 0u32..=100u32, 0i64..5i64),
        1..=max_len,
    )
    .prop_map(|steps| {
        let mut open: Vec<(HoldingKey, Decimal)> = Vec::new();
        let mut date = DateFixtures::ymd(2023, 1, 1);
        let mut records = Vec::with_capacity(steps.len());

        for (holding, units, price, sell, percent, gap) in steps {
            date += Duration::days(gap);
            let held = open
                .iter()
                .find(|(key, _)| *key == holding)
                .map_or(Decimal::ZERO, |(_, units)| *units);

            let delta = if sell && held > Decimal::ZERO {
                let sold = (held * Decimal::from(percent) / Decimal::from(100)).round_dp(3);
                if sold.is_zero() || sold > held {
                    continue;
                }
                -sold
            } else {
                units
            };

            match open.iter().position(|(key, _)| *key == holding) {
                Some(index) => open[index].1 += delta,
                None => open.push((holding.clone(), delta)),
            }

            // Redemptions carry no purchase price, only proceeds
            let recorded_price = if delta > Decimal::ZERO { price } else { Decimal::ZERO };
            records.push(TransactionRecord::new(
                holding,
                delta,
                recorded_price,
                DateFixtures::statement_format(date),
                delta * price,
            ));
        }

        records
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::parse_trade_date;

    proptest! {
        #[test]
        fn units_are_positive(units in units_strategy()) {
            prop_assert!(units > Decimal::ZERO);
        }

        #[test]
        fn generated_dates_parse(date in trade_date_strategy()) {
            let text = DateFixtures::statement_format(date);
            prop_assert_eq!(parse_trade_date(&text).unwrap(), date);
        }

        #[test]
        fn sequences_never_oversell(records in record_sequence_strategy(30)) {
            let mut open: Vec<(HoldingKey, Decimal)> = Vec::new();
            for record in &records {
                let index = match open.iter().position(|(key, _)| *key == record.holding) {
                    Some(index) => index,
                    None => {
                        open.push((record.holding.clone(), Decimal::ZERO));
                        open.len() - 1
                    }
                };
                open[index].1 += record.units;
                prop_assert!(open[index].1 >= Decimal::ZERO);
            }
        }
    }
}
