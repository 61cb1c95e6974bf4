//! Strongly-typed identifiers for holdings
//!
//! Using newtype wrappers around strings prevents accidentally swapping an
//! ISIN and a folio number, and `HoldingKey` gives the (isin, folio) pair a
//! single value type with equality, ordering and hashing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building identifiers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

macro_rules! define_code {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, trimming surrounding whitespace
            pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(IdentifierError::Empty($label));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the label used in error messages
            pub fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_code!(Isin, "ISIN");
define_code!(FolioNumber, "Folio number");

/// Identity of one holding: a security (ISIN) within one account (folio)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HoldingKey {
    pub isin: Isin,
    pub folio: FolioNumber,
}

impl HoldingKey {
    /// Creates a key from already validated parts
    pub fn new(isin: Isin, folio: FolioNumber) -> Self {
        Self { isin, folio }
    }

    /// Parses both parts from raw strings
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::HoldingKey;
    ///
    /// let key = HoldingKey::parse("INF209K01YN0", " 1234567 ").unwrap();
    /// assert_eq!(key.to_string(), "INF209K01YN0/1234567");
    /// ```
    pub fn parse(isin: &str, folio: &str) -> Result<Self, IdentifierError> {
        Ok(Self {
            isin: Isin::new(isin)?,
            folio: FolioNumber::new(folio)?,
        })
    }
}

impl fmt::Display for HoldingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.isin, self.folio)
    }
}
