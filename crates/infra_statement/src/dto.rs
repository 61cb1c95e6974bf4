//! Statement document DTOs
//!
//! Mirrors the transaction-detail JSON export:
//!
//! ```json
//! { "data": [ { "dtTransaction": [ ... ], "dtSummary": [ ... ] } ] }
//! ```
//!
//! Exports are inconsistent about JSON types, so numeric fields and the folio
//! are kept as [`RawValue`] until conversion. Unknown fields are ignored.

use serde::Deserialize;
use std::fmt;

/// A scalar that may arrive as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    /// Text form with surrounding whitespace removed
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.trim().to_string(),
        }
    }

    /// True for an empty or whitespace-only string
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Top-level statement document
#[derive(Debug, Clone, Deserialize)]
pub struct StatementDocument {
    #[serde(default)]
    pub data: Vec<StatementSection>,
}

/// One data section; only the first one is evaluated
#[derive(Debug, Clone, Deserialize)]
pub struct StatementSection {
    #[serde(rename = "dtTransaction", default)]
    pub transactions: Vec<TransactionDto>,
    #[serde(rename = "dtSummary", default)]
    pub summary: Vec<SummaryDto>,
}

/// A `dtTransaction` row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    #[serde(default)]
    pub folio: Option<RawValue>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub trxn_units: Option<RawValue>,
    #[serde(default)]
    pub purchase_price: Option<RawValue>,
    #[serde(default)]
    pub trxn_date: Option<String>,
    #[serde(default)]
    pub trxn_amount: Option<RawValue>,
}

/// A `dtSummary` row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    #[serde(default)]
    pub folio: Option<RawValue>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub nav: Option<RawValue>,
}
