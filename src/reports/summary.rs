//! Summary and table report generators for shell output.
//!
//! Provides compact, human-readable output for terminal usage.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{RankingReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::scoring::ScoredVehicle;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color for a 1-10 value rating.
const fn rating_color(rating: u8) -> &'static str {
    match rating {
        7..=u8::MAX => "green",
        4..=6 => "yellow",
        _ => "red",
    }
}

fn money(value: f64) -> String {
    let whole = value.round().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 && whole > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_vehicle(&self, lines: &mut Vec<String>, scored: &ScoredVehicle) {
        let v = &scored.vehicle;
        lines.push(format!(
            "{} {}  {}",
            self.color(&format!("#{}", scored.rank), "bold"),
            scored.name(),
            self.color(&format!("score {:.2}", scored.weighted_score), "cyan"),
        ));
        lines.push(format!(
            "   Price {}  |  3yr TCO {}  |  APR {:.1}%  |  Value {}",
            money(v.record.price),
            money(v.tco),
            v.estimated_apr,
            self.color(
                &format!("{}/10", scored.value_rating),
                rating_color(scored.value_rating)
            ),
        ));
        if let Some(detail) = &scored.composite {
            lines.push(format!(
                "   {} ownership {}  |  credibility {:.0}  |  {}",
                self.color("Composite:", "dim"),
                money(detail.total_cost),
                detail.credibility,
                detail.market_position,
            ));
        }
        lines.push(format!("   {}", self.color(&scored.explanation, "dim")));
        for advisory in &scored.advisories {
            lines.push(format!("   {}", self.color(&format!("! {}", advisory.message), "yellow")));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_ranking_report(
        &self,
        report: &RankingReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color(config.title_or_default(), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} ({} mode)",
            self.color("Strategy:", "cyan"),
            report.strategy,
            report.mode
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Vehicles:", "cyan"),
            report.vehicle_count
        ));
        let weights: Vec<String> = report
            .weights
            .iter()
            .map(|(category, w)| format!("{category}={w:.1}"))
            .collect();
        lines.push(format!(
            "{}  {}",
            self.color("Weights:", "cyan"),
            weights.join(" ")
        ));

        if report.is_empty() {
            lines.push(String::new());
            lines.push(self.color("No vehicles matched.", "yellow"));
            return Ok(lines.join("\n"));
        }

        let visible = config.visible(report);
        lines.push(String::new());
        for scored in visible {
            self.push_vehicle(&mut lines, scored);
        }
        if visible.len() < report.results.len() {
            lines.push(self.color(
                &format!("... and {} more vehicles", report.results.len() - visible.len()),
                "dim",
            ));
        }

        if config.include_breakdown {
            if let Some(breakdown) = &report.cost_breakdown {
                lines.push(String::new());
                lines.push(self.color("Average Cost Breakdown:", "bold"));
                let total = breakdown.total();
                for (label, value) in breakdown.segments() {
                    let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                    lines.push(format!("  {label:<20} {:>10}  {share:>5.1}%", money(value)));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Table reporter for aligned terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

const NAME_WIDTH: usize = 32;

impl ReportGenerator for TableReporter {
    fn generate_ranking_report(
        &self,
        report: &RankingReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header (padded before coloring so escape codes don't skew alignment)
        let header = format!(
            "{:<5} {} {:>10} {:>10} {:>6} {:>7} {:>6}",
            "RANK",
            pad(&truncate("VEHICLE", NAME_WIDTH), NAME_WIDTH),
            "PRICE",
            "TCO",
            "APR",
            "SCORE",
            "VALUE"
        );
        lines.push(self.color(&header, "bold"));
        lines.push("─".repeat(header.width()));

        for scored in config.visible(report) {
            let v = &scored.vehicle;
            let value = format!("{:>6}", format!("{}/10", scored.value_rating));
            lines.push(format!(
                "{:<5} {} {:>10} {:>10} {:>5.1}% {:>7.2} {}",
                scored.rank,
                pad(&truncate(scored.name(), NAME_WIDTH), NAME_WIDTH),
                money(v.record.price),
                money(v.tco),
                v.estimated_apr,
                scored.weighted_score,
                self.color(&value, rating_color(scored.value_rating)),
            ));
        }

        // Summary
        lines.push(String::new());
        let best = report
            .best()
            .map_or_else(|| "-".to_string(), |b| b.name().to_string());
        lines.push(format!(
            "Total: {} vehicles | Strategy: {} | Mode: {} | Best: {}",
            report.vehicle_count, report.strategy, report.mode, best
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Right-pad to a display width.
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Truncate to a display width, appending "..." when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if max_width > 3 {
        out.push_str("...");
    }
    out
}
