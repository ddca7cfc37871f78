//! JSON exporter for comparison results.
//!
//! Exports per-condition summaries, deviations from the original
//! trajectory and, optionally, the full figure data.

use headpos_core::{Condition, Deviation, Figure, TrajectorySummary};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Results for one condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionReport {
    /// Condition name
    pub condition: Condition,

    /// Legend label used on the figure
    pub label: String,

    /// Log file the trajectory was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Descriptive statistics
    pub summary: TrajectorySummary,

    /// Difference from the original trajectory (absent for the original)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation_from_original: Option<Deviation>,
}

/// Complete comparison export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonExport {
    /// Tool name and version
    pub generated_by: String,

    /// One report per condition, in plot order
    pub conditions: Vec<ConditionReport>,

    /// Plotted data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
}

impl ComparisonExport {
    /// Creates an empty export.
    pub fn new() -> Self {
        Self {
            generated_by: format!("headpos-plot {}", env!("CARGO_PKG_VERSION")),
            conditions: Vec::new(),
            figure: None,
        }
    }

    /// Adds a condition report.
    pub fn add_condition(&mut self, report: ConditionReport) {
        self.conditions.push(report);
    }

    /// Attaches the figure data.
    pub fn with_figure(mut self, figure: Figure) -> Self {
        self.figure = Some(figure);
        self
    }

    /// Report for a condition, if present.
    pub fn condition(&self, condition: Condition) -> Option<&ConditionReport> {
        self.conditions.iter().find(|r| r.condition == condition)
    }

    /// Pretty JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

impl Default for ComparisonExport {
    fn default() -> Self {
        Self::new()
    }
}
