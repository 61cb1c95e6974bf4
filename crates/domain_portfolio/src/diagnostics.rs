//! Per-record issues collected during an evaluation
//!
//! Problems confined to a single record never abort a run. They are
//! recorded here and returned with the report so the caller can decide what
//! to do with them.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use core_kernel::HoldingKey;

/// A non-fatal issue found while evaluating a portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The trade date could not be parsed; the record was skipped
    #[serde(rename_all = "camelCase")]
    MalformedDate {
        sequence: usize,
        holding: HoldingKey,
        input: String,
    },
    /// No NAV in the snapshot for a holding with open units; valued at zero
    #[serde(rename_all = "camelCase")]
    MissingNav { holding: HoldingKey },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedDate { sequence, holding, input } => write!(
                f,
                "record #{} ({}) skipped: unparseable trade date '{}'",
                sequence, holding, input
            ),
            Diagnostic::MissingNav { holding } => {
                write!(f, "no NAV for {}; holding valued at zero", holding)
            }
        }
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and logs it
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "Portfolio diagnostic");
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records skipped because their date did not parse
    pub fn skipped_records(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedDate { .. }))
            .count()
    }

    /// Holdings that were valued without a NAV
    pub fn missing_navs(&self) -> Vec<&HoldingKey> {
        self.entries
            .iter()
            .filter_map(|d| match d {
                Diagnostic::MissingNav { holding } => Some(holding),
                _ => None,
            })
            .collect()
    }
}
