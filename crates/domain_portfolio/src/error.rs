//! Portfolio domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::HoldingKey;

use crate::xirr::XirrError;

/// Errors that abort a portfolio evaluation
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Insufficient lots for {holding}: redemption of {requested} units is short by {shortfall}")]
    InsufficientLots {
        holding: HoldingKey,
        requested: Decimal,
        shortfall: Decimal,
    },

    #[error("Record #{sequence} ({holding}) has an unparseable trade date '{input}'")]
    MalformedDate {
        sequence: usize,
        holding: HoldingKey,
        input: String,
    },

    #[error("Amounts for {holding} exceed the representable decimal range")]
    Overflow { holding: HoldingKey },

    #[error("XIRR error: {0}")]
    Xirr(#[from] XirrError),
}
