//! Report error handling

use thiserror::Error;

use domain_portfolio::PortfolioError;
use infra_statement::StatementError;

/// Errors that stop a report from being produced
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
