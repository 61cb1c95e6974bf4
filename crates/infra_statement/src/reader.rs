//! Statement loading

use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use domain_portfolio::{TransactionRecord, ValuationSnapshot};

use crate::adapters::{snapshot_entry, transaction_record};
use crate::dto::StatementDocument;
use crate::error::StatementError;

/// Core input decoded from a statement document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    /// Transactions in statement order
    pub records: Vec<TransactionRecord>,
    /// NAV per holding
    pub snapshot: ValuationSnapshot,
}

impl Statement {
    /// Decodes the first data section of a parsed document
    ///
    /// # Errors
    ///
    /// Returns `StatementError::EmptyDocument` when `data` is empty, or the
    /// first conversion error of any row.
    pub fn from_document(document: StatementDocument) -> Result<Self, StatementError> {
        let section = document
            .data
            .into_iter()
            .next()
            .ok_or(StatementError::EmptyDocument)?;

        let records = section
            .transactions
            .iter()
            .enumerate()
            .map(|(index, dto)| transaction_record(index, dto))
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = section
            .summary
            .iter()
            .enumerate()
            .map(|(index, dto)| snapshot_entry(index, dto))
            .collect::<Result<ValuationSnapshot, _>>()?;

        debug!(
            transactions = records.len(),
            snapshot = snapshot.len(),
            "Statement decoded"
        );

        Ok(Self { records, snapshot })
    }
}

/// Parses a statement from its JSON text
pub fn parse_statement(json: &str) -> Result<Statement, StatementError> {
    let document: StatementDocument = serde_json::from_str(json)?;
    Statement::from_document(document)
}

/// Reads and parses a statement file
///
/// # Example
///
/// ```rust,ignore
/// use infra_statement::load_statement;
///
/// let statement = load_statement("transaction_detail.json")?;
/// println!("{} transactions", statement.records.len());
/// ```
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_statement(path: impl AsRef<Path>) -> Result<Statement, StatementError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| StatementError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let statement = parse_statement(&json)?;
    info!(
        transactions = statement.records.len(),
        holdings_priced = statement.snapshot.len(),
        "Statement loaded"
    );
    Ok(statement)
}
