//! Report rendering

use domain_portfolio::PortfolioReport;

use crate::config::OutputFormat;

/// Renders the report in the configured format
pub fn render(report: &PortfolioReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Headline figures followed by a warning summary when there is one
pub fn render_text(report: &PortfolioReport) -> String {
    let mut lines = vec![
        format!("Total Portfolio Value: {}", report.total_value.normalize()),
        format!("Total Portfolio Gain: {}", report.total_gain.normalize()),
        format!("Portfolio XIRR: {}", report.xirr),
    ];

    if !report.diagnostics.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Skipped records: {}, warnings: {}",
            report.skipped_records(),
            report.diagnostics.len()
        ));
        lines.extend(report.diagnostics.iter().map(|d| format!("  - {}", d)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_json(report: &PortfolioReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
