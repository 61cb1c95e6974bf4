//! Date normalisation and chronological ordering
//!
//! Both lot matching and cash-flow dating depend on processing events in
//! time order. Records are dated here once and stable-sorted by trade date,
//! so same-day records keep their statement order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::parse_trade_date;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::PortfolioError;
use crate::transaction::{Transaction, TransactionRecord};

/// What to do with a record whose trade date cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Leave the record out and report it as a diagnostic
    #[default]
    Skip,
    /// Fail the whole evaluation
    Abort,
}

/// Parses record dates and returns the transactions in chronological order
///
/// # Errors
///
/// Returns `PortfolioError::MalformedDate` for the first bad date when the
/// policy is `RecordPolicy::Abort`.
pub fn prepare_transactions(
    records: &[TransactionRecord],
    policy: RecordPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Transaction>, PortfolioError> {
    let mut transactions = Vec::with_capacity(records.len());

    for (sequence, record) in records.iter().enumerate() {
        match parse_trade_date(&record.trade_date) {
            Ok(date) => transactions.push(Transaction::from_record(sequence, record, date)),
            Err(_) if policy == RecordPolicy::Abort => {
                return Err(PortfolioError::MalformedDate {
                    sequence,
                    holding: record.holding.clone(),
                    input: record.trade_date.clone(),
                });
            }
            Err(_) => diagnostics.push(Diagnostic::MalformedDate {
                sequence,
                holding: record.holding.clone(),
                input: record.trade_date.clone(),
            }),
        }
    }

    // sort_by_key is stable
    transactions.sort_by_key(|t| t.date);

    debug!(
        dated = transactions.len(),
        skipped = records.len() - transactions.len(),
        "Transactions ordered"
    );

    Ok(transactions)
}
