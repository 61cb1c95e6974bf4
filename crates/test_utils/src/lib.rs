//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! portfolio valuation test suite.
//!
//! # Modules
//!
//! - `fixtures`: Holdings, dates, and the sample statement file
//! - `builders`: Builder patterns for records and NAV snapshots
//! - `assertions`: Approximate comparisons for amounts and rates
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
