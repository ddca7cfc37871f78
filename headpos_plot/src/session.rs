//! Loading the three head-position logs and building the comparison.

use crate::exporter::{ComparisonExport, ConditionReport};
use anyhow::{Context, Result};
use headpos_core::{
    read_head_pos, Comparison, Condition, Deviation, Figure, PlotConfig, StyleOverrides,
    Trajectory, TrajectorySummary,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input files of a comparison run.
#[derive(Debug, Clone)]
pub struct SessionInputs {
    pub stationary: PathBuf,
    pub original: PathBuf,
    pub simulated: PathBuf,

    /// Optional JSON file with [`StyleOverrides`]
    pub style: Option<PathBuf>,
}

impl SessionInputs {
    /// Log path for a condition.
    pub fn path(&self, condition: Condition) -> &Path {
        match condition {
            Condition::Stationary => &self.stationary,
            Condition::Original => &self.original,
            Condition::Simulated => &self.simulated,
        }
    }
}

/// A loaded comparison together with where its data came from.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    pub inputs: SessionInputs,
    pub comparison: Comparison,
}

impl ComparisonSession {
    /// Reads all three logs and the optional style file.
    pub fn load(inputs: SessionInputs) -> Result<Self> {
        let stationary = load_log(&inputs.stationary)?;
        let original = load_log(&inputs.original)?;
        let simulated = load_log(&inputs.simulated)?;

        let overrides = match &inputs.style {
            Some(path) => load_style(path)?,
            None => StyleOverrides::default(),
        };

        let comparison = Comparison::new(stationary, original, simulated).with_styles(&overrides);
        Ok(Self { inputs, comparison })
    }

    /// Builds the comparison figure.
    pub fn figure(&self, config: &PlotConfig) -> Figure {
        self.comparison.plot_with(config)
    }

    /// Summaries and deviations for every condition, in plot order.
    pub fn report(&self) -> ComparisonExport {
        let reference = &self.comparison.get(Condition::Original).trajectory;
        let mut export = ComparisonExport::new();

        for series in self.comparison.series() {
            let deviation = (series.condition != Condition::Original)
                .then(|| Deviation::between(reference, &series.trajectory));

            export.add_condition(ConditionReport {
                condition: series.condition,
                label: series.style.label.clone(),
                source: Some(self.inputs.path(series.condition).display().to_string()),
                summary: TrajectorySummary::of(&series.trajectory),
                deviation_from_original: deviation,
            });
        }
        export
    }
}

fn load_log(path: &Path) -> Result<Trajectory> {
    let trajectory = read_head_pos(path)
        .with_context(|| format!("Failed to read head positions from {}", path.display()))?;
    debug!(
        "Loaded {} samples ({:.1}s) from {}",
        trajectory.len(),
        trajectory.duration(),
        path.display()
    );
    Ok(trajectory)
}

fn load_style(path: &Path) -> Result<StyleOverrides> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read style file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid style file {}", path.display()))
}
