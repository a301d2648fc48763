//! Markdown report generator.

use std::fmt::Write as _;

use super::escape::{escape_markdown_inline, escape_markdown_table, escape_md_opt};
use super::{RankingReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};

/// Markdown report generator
pub struct MarkdownReporter {
    /// Include per-vehicle detail sections below the table
    include_details: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_details: true,
        }
    }

    /// Emit only the ranking table
    #[must_use]
    pub const fn table_only(mut self) -> Self {
        self.include_details = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate_ranking_report(
        &self,
        report: &RankingReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut md = String::new();

        writeln!(md, "# {}", escape_markdown_inline(config.title_or_default()))?;
        writeln!(md)?;
        writeln!(
            md,
            "**Strategy:** {} | **Mode:** {} | **Vehicles:** {}",
            report.strategy, report.mode, report.vehicle_count
        )?;
        writeln!(md)?;
        writeln!(md, "_Generated {}_", report.generated_at)?;
        writeln!(md)?;

        writeln!(md, "## Weights")?;
        writeln!(md)?;
        writeln!(md, "| Category | Weight |")?;
        writeln!(md, "|----------|-------:|")?;
        for (category, weight) in report.weights.iter() {
            writeln!(md, "| {} | {weight:.2} |", category.label())?;
        }
        writeln!(md)?;

        writeln!(md, "## Ranking")?;
        writeln!(md)?;
        let visible = config.visible(report);
        if visible.is_empty() {
            writeln!(md, "_No vehicles matched._")?;
        } else {
            writeln!(
                md,
                "| Rank | Vehicle | Fuel | Price | 3yr TCO | APR | Score | Value |"
            )?;
            writeln!(
                md,
                "|-----:|---------|------|------:|--------:|----:|------:|------:|"
            )?;
            for scored in visible {
                let v = &scored.vehicle;
                writeln!(
                    md,
                    "| {} | {} | {} | ${:.0} | ${:.0} | {:.1}% | {:.2} | {}/10 |",
                    scored.rank,
                    escape_markdown_table(scored.name()),
                    v.record.fuel_type,
                    v.record.price,
                    v.tco,
                    v.estimated_apr,
                    scored.weighted_score,
                    scored.value_rating
                )?;
            }
        }
        writeln!(md)?;

        if self.include_details {
            for scored in visible {
                let r = &scored.vehicle.record;
                writeln!(md, "### {}. {}", scored.rank, escape_markdown_inline(scored.name()))?;
                writeln!(md)?;
                writeln!(md, "{}", escape_markdown_inline(&scored.explanation))?;
                writeln!(md)?;
                writeln!(md, "| Category | Score |")?;
                writeln!(md, "|----------|------:|")?;
                for (name, score) in &scored.category_scores {
                    writeln!(md, "| {} | {score:.2} |", escape_markdown_table(name))?;
                }
                writeln!(md)?;
                writeln!(md, "- Body type: {}", escape_md_opt(r.body_type.as_deref()))?;
                if let Some(notes) = &r.notes {
                    writeln!(md, "- Notes: {}", escape_markdown_inline(notes))?;
                }
                for advisory in &scored.advisories {
                    writeln!(md, "- **Advisory:** {}", escape_markdown_inline(&advisory.message))?;
                }
                writeln!(md)?;
            }
        }

        if config.include_breakdown {
            if let Some(breakdown) = &report.cost_breakdown {
                writeln!(md, "## Average Cost Breakdown")?;
                writeln!(md)?;
                writeln!(md, "| Segment | Average |")?;
                writeln!(md, "|---------|--------:|")?;
                for (label, value) in breakdown.segments() {
                    writeln!(md, "| {label} | ${value:.0} |")?;
                }
                writeln!(md, "| **Total** | **${:.0}** |", breakdown.total())?;
                writeln!(md)?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_report;

    #[test]
    fn test_markdown_escapes_names() {
        let report = sample_report();
        let output = MarkdownReporter::new()
            .generate_ranking_report(&report, &ReportConfig::default())
            .unwrap();
        assert!(output.starts_with("# Vehicle Ranking\n"));
        assert!(output.contains("## Ranking"));
        assert!(output.contains("M3 \"Comp\" \\| Track"));
        assert!(output.contains("### 1. 2024 Toyota Camry"));
    }

    #[test]
    fn test_table_only_skips_details() {
        let report = sample_report();
        let config = ReportConfig {
            title: Some("Fleet Shortlist".to_string()),
            ..ReportConfig::default()
        }
        .with_breakdown(true);
        let output = MarkdownReporter::new()
            .table_only()
            .generate_ranking_report(&report, &config)
            .unwrap();
        assert!(output.starts_with("# Fleet Shortlist"));
        assert!(!output.contains("### "));
        assert!(output.contains("## Average Cost Breakdown"));
    }
}
