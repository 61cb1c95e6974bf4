//! Portfolio Report Binary
//!
//! Prints the total value, unrealized gain, and XIRR of a statement.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate ./transaction_detail.json as of today
//! cargo run --bin portfolio-report
//!
//! # Explicit file, fixed valuation date, JSON output
//! REPORT_AS_OF=2024-01-01 REPORT_OUTPUT_FORMAT=json cargo run --bin portfolio-report -- statement.json
//! ```
//!
//! The first argument, when present, overrides `REPORT_STATEMENT_PATH`.

use anyhow::Context;
use interface_cli::{run, ReportConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level);

    tracing::info!(
        path = %config.statement_path.display(),
        as_of = %config.as_of_date(),
        "Generating portfolio report"
    );

    let output = run(&config).with_context(|| {
        format!("Failed to report on {}", config.statement_path.display())
    })?;
    print!("{}", output);

    Ok(())
}

/// Loads configuration from the environment and the command line
fn load_config() -> anyhow::Result<ReportConfig> {
    let config = ReportConfig::from_env().context("Invalid REPORT_* configuration")?;

    Ok(match std::env::args_os().nth(1) {
        Some(path) => config.with_statement_path(path),
        None => config,
    })
}

/// Logs go to stderr so stdout carries only the report
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
