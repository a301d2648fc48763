//! Report destinations.
//!
//! A rendered report goes either to stdout or to a file. The destination
//! decides what the `auto` format resolves to and whether ANSI colors may
//! be emitted.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Where a rendered report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl OutputTarget {
    /// True only for stdout attached to an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        *self == Self::Stdout && std::io::stdout().is_terminal()
    }

    /// Concrete format for this destination.
    ///
    /// `auto` becomes the aligned table on an interactive terminal and the
    /// plain summary everywhere else. Explicit formats pass through.
    pub fn resolve_format(&self, requested: ReportFormat) -> ReportFormat {
        match requested {
            ReportFormat::Auto if self.is_terminal() => ReportFormat::Table,
            ReportFormat::Auto => ReportFormat::Summary,
            explicit => explicit,
        }
    }

    /// Whether escape codes may be written here.
    ///
    /// Files never get color. Stdout gets it unless `--no-color` was passed
    /// or `NO_COLOR` is set to a non-empty value.
    pub fn use_color(&self, no_color: bool) -> bool {
        if no_color || matches!(self, Self::File(_)) {
            return false;
        }
        std::env::var_os("NO_COLOR").map_or(true, |value| value.is_empty())
    }

    /// Write `content`, logging the path of written files unless `quiet`.
    pub fn write(&self, content: &str, quiet: bool) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{content}").context("Failed to write report to stdout")
            }
            Self::File(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                if !quiet {
                    tracing::info!("Report written to {}", path.display());
                }
                Ok(())
            }
        }
    }
}
