//! Report output stage.
//!
//! Renders a ranking report in the configured format and writes it to
//! stdout or a file.

use anyhow::Result;

use crate::config::OutputConfig;
use crate::reports::{create_reporter_with_options, RankingReport, ReportConfig};

use super::OutputTarget;

/// Output a ranking report to the configured destination.
///
/// Handles format auto-detection, color selection and writing to file or
/// stdout.
pub fn output_report(output: &OutputConfig, report: &RankingReport, quiet: bool) -> Result<()> {
    let target = OutputTarget::from(output.file.clone());
    let format = target.resolve_format(output.format);
    let use_color = target.use_color(output.no_color);

    let report_config = ReportConfig {
        top: output.top,
        title: None,
        include_breakdown: output.breakdown,
    };

    tracing::debug!("Rendering {} report (color: {})", format, use_color);
    let reporter = create_reporter_with_options(format, use_color);
    let rendered = reporter.generate_ranking_report(report, &report_config)?;

    target.write(&rendered, quiet)
}
