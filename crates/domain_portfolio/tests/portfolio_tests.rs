//! Comprehensive tests for domain_portfolio
//!
//! Tests cover FIFO lot matching, valuation, chronological ordering,
//! cash-flow building, and the full evaluation pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::HoldingKey;

use domain_portfolio::{
    build_cash_flows, evaluate, match_lots, net_present_value, prepare_transactions,
    value_portfolio, CashFlow, Diagnostic, Diagnostics, EvaluationOptions, PortfolioError,
    RecordPolicy, SnapshotEntry, Transaction, TransactionRecord, ValuationSnapshot, XirrError,
};

const ISIN_A: &str = "INF179K01BE2";
const ISIN_B: &str = "INF209K01YN0";

fn holding(isin: &str, folio: &str) -> HoldingKey {
    HoldingKey::parse(isin, folio).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Duration::days(offset)
}

fn trade(sequence: usize, key: &HoldingKey, units: Decimal, price: Decimal, offset: i64) -> Transaction {
    Transaction {
        sequence,
        holding: key.clone(),
        units,
        price,
        date: day(offset),
        amount: units * price,
    }
}

fn record(key: &HoldingKey, units: Decimal, price: Decimal, date: &str, amount: Decimal) -> TransactionRecord {
    TransactionRecord::new(key.clone(), units, price, date, amount)
}

// ============================================================================
// FIFO Lot Matching Tests
// ============================================================================

mod fifo_tests {
    use super::*;

    #[test]
    fn test_partial_redemption_leaves_remaining_units() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(100), dec!(10), 0),
            trade(1, &key, dec!(-40), dec!(0), 100),
        ])
        .unwrap();

        let queue = book.queue(&key).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.total_units(), dec!(60));
        assert_eq!(queue.acquisition_cost(), Some(dec!(600)));
    }

    #[test]
    fn test_redemption_spanning_two_lots() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(50), dec!(20), 0),
            trade(1, &key, dec!(50), dec!(25), 30),
            trade(2, &key, dec!(-60), dec!(0), 60),
        ])
        .unwrap();

        let queue = book.queue(&key).unwrap();
        assert_eq!(queue.len(), 1);
        let lot = queue.peek_oldest().unwrap();
        assert_eq!(lot.units(), dec!(40));
        assert_eq!(lot.price(), dec!(25));
        assert_eq!(lot.date(), day(30));
    }

    #[test]
    fn test_small_redemption_only_touches_oldest_lot() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(30), dec!(10), 0),
            trade(1, &key, dec!(20), dec!(11), 10),
            trade(2, &key, dec!(-5), dec!(0), 20),
        ])
        .unwrap();

        let lots: Vec<_> = book.queue(&key).unwrap().iter().cloned().collect();
        assert_eq!(lots[0].units(), dec!(25));
        assert_eq!(lots[1].units(), dec!(20));
        assert_eq!(lots[1].price(), dec!(11));
    }

    #[test]
    fn test_exact_redemption_removes_oldest_lot_only() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(30), dec!(10), 0),
            trade(1, &key, dec!(20), dec!(11), 10),
            trade(2, &key, dec!(-30), dec!(0), 20),
        ])
        .unwrap();

        let queue = book.queue(&key).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_oldest().unwrap().units(), dec!(20));
        assert_eq!(queue.peek_oldest().unwrap().date(), day(10));
    }

    #[test]
    fn test_full_liquidation_keeps_empty_holding() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(10), dec!(10), 0),
            trade(1, &key, dec!(-10), dec!(0), 5),
        ])
        .unwrap();

        assert_eq!(book.len(), 1);
        assert!(book.queue(&key).unwrap().is_empty());
    }

    #[test]
    fn test_oversold_redemption_reports_shortfall() {
        let key = holding(ISIN_A, "1001");
        let result = match_lots(&[
            trade(0, &key, dec!(10), dec!(10), 0),
            trade(1, &key, dec!(-15.5), dec!(0), 5),
        ]);

        match result {
            Err(PortfolioError::InsufficientLots { holding, requested, shortfall }) => {
                assert_eq!(holding, key);
                assert_eq!(requested, dec!(15.5));
                assert_eq!(shortfall, dec!(5.5));
            }
            other => panic!("Expected InsufficientLots, got {:?}", other),
        }
    }

    #[test]
    fn test_redemption_without_any_purchase_is_oversold() {
        let key = holding(ISIN_A, "1001");
        let result = match_lots(&[trade(0, &key, dec!(-1), dec!(0), 0)]);
        assert!(matches!(result, Err(PortfolioError::InsufficientLots { .. })));
    }

    #[test]
    fn test_zero_units_are_ignored() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(10), dec!(10), 0),
            trade(1, &key, dec!(0), dec!(12), 5),
        ])
        .unwrap();

        let queue = book.queue(&key).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.total_units(), dec!(10));
    }

    #[test]
    fn test_holdings_are_matched_independently() {
        let same_isin_other_folio = holding(ISIN_A, "2002");
        let key = holding(ISIN_A, "1001");
        let other = holding(ISIN_B, "1001");

        let book = match_lots(&[
            trade(0, &key, dec!(10), dec!(10), 0),
            trade(1, &other, dec!(5), dec!(50), 1),
            trade(2, &same_isin_other_folio, dec!(7), dec!(10), 2),
            trade(3, &key, dec!(-4), dec!(0), 3),
        ])
        .unwrap();

        assert_eq!(book.len(), 3);
        assert_eq!(book.queue(&key).unwrap().total_units(), dec!(6));
        assert_eq!(book.queue(&other).unwrap().total_units(), dec!(5));
        assert_eq!(book.queue(&same_isin_other_folio).unwrap().total_units(), dec!(7));
    }

    #[test]
    fn test_purchase_beyond_decimal_range_is_rejected() {
        let key = holding(ISIN_A, "1001");
        let max = Transaction {
            sequence: 0,
            holding: key.clone(),
            units: Decimal::MAX,
            price: dec!(0),
            date: day(0),
            amount: dec!(0),
        };

        let result = match_lots(&[max, trade(1, &key, dec!(1), dec!(1), 1)]);

        match result {
            Err(PortfolioError::Overflow { holding }) => assert_eq!(holding, key),
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }
}

// ============================================================================
// Valuation Tests
// ============================================================================

mod valuation_tests {
    use super::*;

    #[test]
    fn test_partial_redemption_valuation() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(100), dec!(10), 0),
            trade(1, &key, dec!(-40), dec!(0), 100),
        ])
        .unwrap();
        let snapshot = ValuationSnapshot::new(vec![SnapshotEntry::new(key.clone(), dec!(12))]);
        let mut diagnostics = Diagnostics::new();

        let valuation = value_portfolio(&book, &snapshot, &mut diagnostics).unwrap();

        assert_eq!(valuation.total_value, dec!(720));
        assert_eq!(valuation.total_gain, dec!(120));
        let holding = &valuation.holdings[0];
        assert_eq!(holding.units, dec!(60));
        assert_eq!(holding.acquisition_cost, dec!(600));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_totals_sum_across_holdings() {
        let a = holding(ISIN_A, "1001");
        let b = holding(ISIN_B, "1001");
        let book = match_lots(&[
            trade(0, &a, dec!(10), dec!(10), 0),
            trade(1, &b, dec!(4), dec!(50), 0),
        ])
        .unwrap();
        let snapshot: ValuationSnapshot = vec![
            SnapshotEntry::new(a.clone(), dec!(11)),
            SnapshotEntry::new(b.clone(), dec!(45)),
        ]
        .into_iter()
        .collect();

        let valuation = value_portfolio(&book, &snapshot, &mut Diagnostics::new()).unwrap();

        assert_eq!(valuation.total_value, dec!(290));
        assert_eq!(valuation.total_gain, dec!(-10));
        assert_eq!(valuation.holdings.len(), 2);
    }

    #[test]
    fn test_missing_nav_values_holding_at_zero() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[trade(0, &key, dec!(10), dec!(10), 0)]).unwrap();
        let mut diagnostics = Diagnostics::new();

        let valuation = value_portfolio(&book, &ValuationSnapshot::default(), &mut diagnostics).unwrap();

        assert_eq!(valuation.total_value, dec!(0));
        assert_eq!(valuation.total_gain, dec!(-100));
        assert_eq!(diagnostics.missing_navs(), vec![&key]);
    }

    #[test]
    fn test_liquidated_holding_has_zero_value_and_no_warning() {
        let key = holding(ISIN_A, "1001");
        let book = match_lots(&[
            trade(0, &key, dec!(10), dec!(10), 0),
            trade(1, &key, dec!(-10), dec!(0), 10),
        ])
        .unwrap();
        let mut diagnostics = Diagnostics::new();

        let valuation = value_portfolio(&book, &ValuationSnapshot::default(), &mut diagnostics).unwrap();

        assert_eq!(valuation.total_value, Decimal::ZERO);
        assert_eq!(valuation.total_gain, Decimal::ZERO);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_snapshot_entry_wins() {
        let key = holding(ISIN_A, "1001");
        let snapshot = ValuationSnapshot::new(vec![
            SnapshotEntry::new(key.clone(), dec!(12)),
            SnapshotEntry::new(key.clone(), dec!(99)),
        ]);

        assert_eq!(snapshot.nav_for(&key), Some(dec!(12)));
    }

    #[test]
    fn test_snapshot_lookup_needs_matching_folio() {
        let snapshot = ValuationSnapshot::new(vec![SnapshotEntry::new(holding(ISIN_A, "1001"), dec!(12))]);
        assert_eq!(snapshot.nav_for(&holding(ISIN_A, "2002")), None);
    }
}

// ============================================================================
// Chronological Ordering Tests
// ============================================================================

mod chronology_tests {
    use super::*;

    #[test]
    fn test_records_are_sorted_by_date() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(-60), dec!(0), "02-Mar-2023", dec!(-1500)),
            record(&key, dec!(50), dec!(20), "01-Jan-2023", dec!(1000)),
            record(&key, dec!(50), dec!(25), "31-Jan-2023", dec!(1250)),
        ];

        let transactions =
            prepare_transactions(&records, RecordPolicy::Skip, &mut Diagnostics::new()).unwrap();

        let sequences: Vec<usize> = transactions.iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 0]);

        let book = match_lots(&transactions).unwrap();
        let queue = book.queue(&key).unwrap();
        assert_eq!(queue.total_units(), dec!(40));
        assert_eq!(queue.peek_oldest().unwrap().price(), dec!(25));
    }

    #[test]
    fn test_same_day_records_keep_statement_order() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(10), dec!(10), "05-Jan-2023", dec!(100)),
            record(&key, dec!(-10), dec!(0), "05-Jan-2023", dec!(-100)),
            record(&key, dec!(3), dec!(10), "04-Jan-2023", dec!(30)),
        ];

        let transactions =
            prepare_transactions(&records, RecordPolicy::Skip, &mut Diagnostics::new()).unwrap();

        let sequences: Vec<usize> = transactions.iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![2, 0, 1]);
    }

    #[test]
    fn test_malformed_date_is_skipped_and_reported() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(10), dec!(10), "05-Jan-2023", dec!(100)),
            record(&key, dec!(10), dec!(10), "2023-01-06", dec!(100)),
        ];
        let mut diagnostics = Diagnostics::new();

        let transactions = prepare_transactions(&records, RecordPolicy::Skip, &mut diagnostics).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(diagnostics.skipped_records(), 1);
        assert_eq!(
            diagnostics.iter().next(),
            Some(&Diagnostic::MalformedDate {
                sequence: 1,
                holding: key,
                input: "2023-01-06".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_date_aborts_under_abort_policy() {
        let key = holding(ISIN_A, "1001");
        let records = vec![record(&key, dec!(10), dec!(10), "", dec!(100))];

        let result = prepare_transactions(&records, RecordPolicy::Abort, &mut Diagnostics::new());

        assert!(matches!(result, Err(PortfolioError::MalformedDate { sequence: 0, .. })));
    }
}

// ============================================================================
// Cash Flow Tests
// ============================================================================

mod cash_flow_tests {
    use super::*;

    #[test]
    fn test_flows_negate_amounts_and_end_with_terminal_value() {
        let key = holding(ISIN_A, "1001");
        let transactions = vec![
            trade(0, &key, dec!(100), dec!(10), 0),
            Transaction { amount: dec!(-480), ..trade(1, &key, dec!(-40), dec!(0), 100) },
        ];

        let flows = build_cash_flows(&transactions, day(365), dec!(720));

        assert_eq!(
            flows,
            vec![
                CashFlow::new(day(0), dec!(-1000)),
                CashFlow::new(day(100), dec!(480)),
                CashFlow::new(day(365), dec!(720)),
            ]
        );
    }
}

// ============================================================================
// Evaluation Pipeline Tests
// ============================================================================

mod evaluation_tests {
    use super::*;

    fn snapshot(key: &HoldingKey, nav: Decimal) -> ValuationSnapshot {
        ValuationSnapshot::new(vec![SnapshotEntry::new(key.clone(), nav)])
    }

    #[test]
    fn test_evaluate_partial_redemption() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(100), dec!(10), "01-Jan-2023", dec!(1000)),
            record(&key, dec!(-40), dec!(0), "11-Apr-2023", dec!(-480)),
        ];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let report = evaluate(&records, &snapshot(&key, dec!(12)), &options).unwrap();

        assert_eq!(report.total_value, dec!(720));
        assert_eq!(report.total_gain, dec!(120));
        assert_eq!(report.cash_flows.len(), 3);
        assert!(report.xirr > 0.0);
        assert!(net_present_value(&report.cash_flows, report.xirr).abs() < 1e-4);
        assert_eq!(report.skipped_records(), 0);
    }

    #[test]
    fn test_evaluate_one_year_ten_percent() {
        let key = holding(ISIN_A, "1001");
        let records = vec![record(&key, dec!(10), dec!(10), "01-Jan-2023", dec!(100))];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let report = evaluate(&records, &snapshot(&key, dec!(11)), &options).unwrap();

        assert_eq!(report.total_value, dec!(110));
        assert!((report.xirr - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_evaluate_skips_bad_dates_and_reports_them() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(10), dec!(10), "01-Jan-2023", dec!(100)),
            record(&key, dec!(10), dec!(10), "unknown", dec!(100)),
        ];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let report = evaluate(&records, &snapshot(&key, dec!(11)), &options).unwrap();

        assert_eq!(report.skipped_records(), 1);
        assert_eq!(report.total_value, dec!(110));
        assert_eq!(report.cash_flows.len(), 2);
    }

    #[test]
    fn test_evaluate_oversold_is_fatal() {
        let key = holding(ISIN_A, "1001");
        let records = vec![
            record(&key, dec!(10), dec!(10), "01-Jan-2023", dec!(100)),
            record(&key, dec!(-11), dec!(0), "01-Feb-2023", dec!(-110)),
        ];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let result = evaluate(&records, &snapshot(&key, dec!(11)), &options);

        assert!(matches!(result, Err(PortfolioError::InsufficientLots { .. })));
    }

    #[test]
    fn test_evaluate_without_value_or_redemptions_has_no_xirr() {
        let key = holding(ISIN_A, "1001");
        let records = vec![record(&key, dec!(10), dec!(10), "01-Jan-2023", dec!(100))];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let result = evaluate(&records, &ValuationSnapshot::default(), &options);

        assert!(matches!(result, Err(PortfolioError::Xirr(XirrError::NoSignChange))));
    }

    #[test]
    fn test_evaluate_cost_overflow_is_an_error() {
        let key = holding(ISIN_A, "1001");
        let units = Decimal::from_scientific("1e20").unwrap();
        let price = Decimal::from_scientific("1e10").unwrap();
        let records = vec![record(&key, units, price, "01-Jan-2023", dec!(1000))];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let result = evaluate(&records, &snapshot(&key, dec!(1)), &options);

        match result {
            Err(PortfolioError::Overflow { holding }) => assert_eq!(holding, key),
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_total_overflow_is_an_error() {
        let a = holding(ISIN_A, "1001");
        let b = holding(ISIN_B, "1001");
        let records = vec![
            record(&a, Decimal::MAX, dec!(0), "01-Jan-2023", dec!(1)),
            record(&b, Decimal::MAX, dec!(0), "01-Jan-2023", dec!(1)),
        ];
        let snapshot = ValuationSnapshot::new(vec![
            SnapshotEntry::new(a.clone(), dec!(1)),
            SnapshotEntry::new(b.clone(), dec!(1)),
        ]);
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let result = evaluate(&records, &snapshot, &options);

        assert!(matches!(result, Err(PortfolioError::Overflow { holding }) if holding == b));
    }

    #[test]
    fn test_report_serializes_headline_fields() {
        let key = holding(ISIN_A, "1001");
        let records = vec![record(&key, dec!(10), dec!(10), "01-Jan-2023", dec!(100))];
        let options = EvaluationOptions::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let report = evaluate(&records, &snapshot(&key, dec!(11)), &options).unwrap();

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalValue"].as_f64(), Some(110.0));
        assert_eq!(json["totalGain"].as_f64(), Some(10.0));
        assert!(json["xirr"].as_f64().is_some());
        assert_eq!(json["asOf"], "2024-01-01");
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
