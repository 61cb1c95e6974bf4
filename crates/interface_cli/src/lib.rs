//! Portfolio Report Interface Layer
//!
//! Loads a transaction-detail statement, evaluates it, and renders the
//! result for the `portfolio-report` binary.
//!
//! # Configuration
//!
//! Settings come from `REPORT_*` environment variables (a `.env` file is
//! honoured by the binary):
//!
//! * `REPORT_STATEMENT_PATH` - statement file (default: `transaction_detail.json`)
//! * `REPORT_AS_OF` - valuation date, `YYYY-MM-DD` (default: today)
//! * `REPORT_LOG_LEVEL` - log level (default: `info`)
//! * `REPORT_OUTPUT_FORMAT` - `text` or `json`
//! * `REPORT_RECORD_POLICY` - `skip` or `abort` for records with bad dates
//! * `REPORT_XIRR_MAX_ITERATIONS`, `REPORT_XIRR_TOLERANCE` - solver limits

pub mod config;
pub mod error;
pub mod output;

use tracing::{info, instrument};

use domain_portfolio::{evaluate, PortfolioReport};
use infra_statement::load_statement;

pub use config::{OutputFormat, ReportConfig};
pub use error::ReportError;
pub use output::{render, render_json, render_text};

/// Loads the configured statement and evaluates it
#[instrument(skip_all, fields(path = %config.statement_path.display()))]
pub fn generate_report(config: &ReportConfig) -> Result<PortfolioReport, ReportError> {
    let statement = load_statement(&config.statement_path)?;
    info!(
        records = statement.records.len(),
        holdings = statement.snapshot.len(),
        "Statement loaded"
    );

    let report = evaluate(&statement.records, &statement.snapshot, &config.evaluation_options())?;
    Ok(report)
}

/// Generates the report and renders it in the configured format
pub fn run(config: &ReportConfig) -> Result<String, ReportError> {
    let report = generate_report(config)?;
    Ok(render(&report, config.output_format)?)
}
