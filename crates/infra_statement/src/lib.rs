//! Statement Infrastructure Layer
//!
//! This crate reads the transaction-detail JSON export and turns it into
//! the portfolio domain's input types: a list of [`TransactionRecord`]s and
//! a [`ValuationSnapshot`].
//!
//! Only the first entry of the document's `data` array is used.
//!
//! # Example
//!
//! ```rust
//! use infra_statement::parse_statement;
//!
//! let json = r#"{
//!   "data": [{
//!     "dtTransaction": [{
//!       "folio": "1001", "isin": "INF179K01BE2", "trxnUnits": "100",
//!       "purchasePrice": "10", "trxnDate": "01-Jan-2023", "trxnAmount": "1000"
//!     }],
//!     "dtSummary": [{ "folio": "1001", "isin": "INF179K01BE2", "nav": "12" }]
//!   }]
//! }"#;
//!
//! let statement = parse_statement(json).unwrap();
//! assert_eq!(statement.records.len(), 1);
//! assert_eq!(statement.snapshot.len(), 1);
//! ```
//!
//! [`TransactionRecord`]: domain_portfolio::TransactionRecord
//! [`ValuationSnapshot`]: domain_portfolio::ValuationSnapshot

pub mod adapters;
pub mod dto;
pub mod error;
pub mod reader;

pub use dto::{RawValue, StatementDocument, StatementSection, SummaryDto, TransactionDto};
pub use error::StatementError;
pub use reader::{load_statement, parse_statement, Statement};
