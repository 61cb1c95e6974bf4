//! Core Kernel - Foundational types for the portfolio valuation system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Holding identity (security ISIN within an account folio)
//! - Trade date parsing and day-count helpers

pub mod identifiers;
pub mod temporal;

pub use identifiers::{Isin, FolioNumber, HoldingKey, IdentifierError};
pub use temporal::{parse_trade_date, year_fraction, TemporalError, DAYS_PER_YEAR, TRADE_DATE_FORMAT};
