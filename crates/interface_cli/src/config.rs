//! Report configuration

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::path::PathBuf;

use domain_portfolio::{EvaluationOptions, RecordPolicy, XirrSolver};

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Three headline lines plus any warnings
    #[default]
    Text,
    /// The full report as pretty JSON
    Json,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Statement file to evaluate
    pub statement_path: PathBuf,
    /// Valuation date of the terminal cash flow (today when unset)
    pub as_of: Option<NaiveDate>,
    /// Log level
    pub log_level: String,
    pub output_format: OutputFormat,
    /// Handling of records with unparseable dates
    pub record_policy: RecordPolicy,
    pub xirr_max_iterations: u32,
    pub xirr_tolerance: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let solver = XirrSolver::default();
        Self {
            statement_path: PathBuf::from("transaction_detail.json"),
            as_of: None,
            log_level: "info".to_string(),
            output_format: OutputFormat::default(),
            record_policy: RecordPolicy::default(),
            xirr_max_iterations: solver.max_iterations,
            xirr_tolerance: solver.tolerance,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from `REPORT_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("REPORT"))
            .build()?
            .try_deserialize()
    }

    /// Overrides the statement path
    pub fn with_statement_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.statement_path = path.into();
        self
    }

    /// Valuation date, defaulting to today (UTC)
    pub fn as_of_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Domain evaluation options derived from this configuration
    pub fn evaluation_options(&self) -> EvaluationOptions {
        let solver = XirrSolver::default()
            .with_max_iterations(self.xirr_max_iterations)
            .with_tolerance(self.xirr_tolerance);

        EvaluationOptions::new(self.as_of_date())
            .with_record_policy(self.record_policy)
            .with_solver(solver)
    }
}
