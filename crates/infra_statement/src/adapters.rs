//! Conversion from statement DTOs to domain records

use rust_decimal::Decimal;
use std::str::FromStr;

use core_kernel::HoldingKey;
use domain_portfolio::{SnapshotEntry, TransactionRecord};

use crate::dto::{RawValue, SummaryDto, TransactionDto};
use crate::error::StatementError;

const TRANSACTIONS: &str = "dtTransaction";
const SUMMARY: &str = "dtSummary";

/// Converts a `dtTransaction` row
///
/// A missing or blank `purchasePrice` reads as zero; redemption rows
/// commonly omit it. The trade date is passed through unparsed.
pub fn transaction_record(index: usize, dto: &TransactionDto) -> Result<TransactionRecord, StatementError> {
    let holding = holding_key(TRANSACTIONS, index, dto.isin.as_deref(), dto.folio.as_ref())?;
    let units = required_decimal(TRANSACTIONS, index, "trxnUnits", dto.trxn_units.as_ref())?;
    let price = optional_decimal(TRANSACTIONS, index, "purchasePrice", dto.purchase_price.as_ref())?
        .unwrap_or(Decimal::ZERO);
    let amount = required_decimal(TRANSACTIONS, index, "trxnAmount", dto.trxn_amount.as_ref())?;

    Ok(TransactionRecord::new(
        holding,
        units,
        price,
        dto.trxn_date.clone().unwrap_or_default(),
        amount,
    ))
}

/// Converts a `dtSummary` row
pub fn snapshot_entry(index: usize, dto: &SummaryDto) -> Result<SnapshotEntry, StatementError> {
    let holding = holding_key(SUMMARY, index, dto.isin.as_deref(), dto.folio.as_ref())?;
    let nav = required_decimal(SUMMARY, index, "nav", dto.nav.as_ref())?;
    if nav < Decimal::ZERO {
        return Err(StatementError::InvalidNav { index, nav });
    }
    Ok(SnapshotEntry::new(holding, nav))
}

fn holding_key(
    section: &'static str,
    index: usize,
    isin: Option<&str>,
    folio: Option<&RawValue>,
) -> Result<HoldingKey, StatementError> {
    let isin = isin.ok_or(StatementError::MissingField { section, index, field: "isin" })?;
    let folio = folio.ok_or(StatementError::MissingField { section, index, field: "folio" })?;

    HoldingKey::parse(isin, &folio.to_text())
        .map_err(|source| StatementError::InvalidIdentifier { section, index, source })
}

fn required_decimal(
    section: &'static str,
    index: usize,
    field: &'static str,
    value: Option<&RawValue>,
) -> Result<Decimal, StatementError> {
    optional_decimal(section, index, field, value)?
        .ok_or(StatementError::MissingField { section, index, field })
}

fn optional_decimal(
    section: &'static str,
    index: usize,
    field: &'static str,
    value: Option<&RawValue>,
) -> Result<Option<Decimal>, StatementError> {
    let Some(value) = value.filter(|v| !v.is_blank()) else {
        return Ok(None);
    };

    parse_decimal(&value.to_text())
        .map(Some)
        .ok_or_else(|| StatementError::InvalidNumber {
            section,
            index,
            field,
            value: value.to_text(),
        })
}

/// Reads plain, grouped (`1,250.50`) or scientific (`1.5e3`) notation
fn parse_decimal(text: &str) -> Option<Decimal> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
