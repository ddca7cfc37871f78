//! Trajectory comparison plotter.
//!
//! Overlays the stationary, original and simulated head-position
//! trajectories on a 3-row figure, one row per translation axis.

use crate::condition::{Condition, ConditionSeries, StyleOverrides};
use crate::figure::{AxisLimits, Figure, Legend, Marker, StepLine, StepMode, Subplot};
use crate::trajectory::{Axis, Trajectory, METERS_TO_MM};
use serde::{Deserialize, Serialize};

/// Layout and scaling of the comparison figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Multiplier from stored units (meters) to displayed units
    pub scale: f64,

    /// Horizontal axis label
    pub x_label: String,

    /// Row that carries the legend
    pub legend_row: usize,

    /// Row that carries the horizontal axis label
    pub x_label_row: usize,

    /// Fit axis limits to the data
    pub tight: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            scale: METERS_TO_MM,
            x_label: "Time (sec)".to_string(),
            legend_row: 1,
            x_label_row: 2,
            tight: true,
        }
    }
}

/// The three comparison arms, in plot order.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    series: [ConditionSeries; 3],
}

impl Comparison {
    /// Pairs each trajectory with its condition's default style.
    pub fn new(stationary: Trajectory, original: Trajectory, simulated: Trajectory) -> Self {
        Self {
            series: [
                ConditionSeries::new(Condition::Stationary, stationary),
                ConditionSeries::new(Condition::Original, original),
                ConditionSeries::new(Condition::Simulated, simulated),
            ],
        }
    }

    /// Applies style overrides; conditions without an override keep the default.
    pub fn with_styles(mut self, overrides: &StyleOverrides) -> Self {
        for s in &mut self.series {
            s.style = overrides.style_for(s.condition);
        }
        self
    }

    /// Series in plot order.
    pub fn series(&self) -> &[ConditionSeries; 3] {
        &self.series
    }

    /// Series for a given condition.
    pub fn get(&self, condition: Condition) -> &ConditionSeries {
        &self.series[match condition {
            Condition::Stationary => 0,
            Condition::Original => 1,
            Condition::Simulated => 2,
        }]
    }

    /// Builds the comparison figure with the default layout.
    pub fn plot(&self) -> Figure {
        self.plot_with(&PlotConfig::default())
    }

    /// Builds the comparison figure.
    pub fn plot_with(&self, config: &PlotConfig) -> Figure {
        let subplots = Axis::ALL
            .iter()
            .enumerate()
            .map(|(row, &axis)| {
                let lines: Vec<StepLine> = self
                    .series
                    .iter()
                    .map(|s| step_line(s, axis, config.scale))
                    .collect();

                let legend = (row == config.legend_row).then(|| Legend::from_lines(&lines));
                let x_label = (row == config.x_label_row).then(|| config.x_label.clone());
                let limits = if config.tight {
                    AxisLimits::tight(&lines)
                } else {
                    AxisLimits::tight(&lines).with_margin(0.05)
                };

                Subplot {
                    index: row,
                    y_label: Some(axis.label().to_string()),
                    x_label,
                    lines,
                    legend,
                    limits,
                }
            })
            .collect();

        Figure {
            rows: Axis::ALL.len(),
            cols: 1,
            subplots,
        }
    }
}

fn step_line(series: &ConditionSeries, axis: Axis, scale: f64) -> StepLine {
    StepLine {
        label: series.style.label.clone(),
        color: series.style.color,
        marker: Marker::Circle,
        marker_size: series.style.marker_size,
        step: StepMode::Post,
        x: series.trajectory.times().to_vec(),
        y: series.trajectory.axis_scaled(axis, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Rgb, SeriesStyle};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use proptest::prelude::*;

    fn x_only(times: Vec<f64>, xs: &[f64]) -> Trajectory {
        let translations = xs.iter().map(|&x| Vector3::new(x, 0.0, 0.0)).collect();
        Trajectory::from_translations(times, translations).unwrap()
    }

    fn scenario() -> Comparison {
        let stationary = x_only(vec![0.0, 1.0, 2.0], &[0.0, 0.0, 0.0]);
        let original = x_only(
            vec![0.0, 0.5, 1.0, 1.5, 2.0],
            &[0.0, 1e-3, 0.0, 1e-3, 0.0],
        );
        let simulated = x_only(vec![0.0, 1.0, 2.0], &[0.0, 2e-3, 2e-3]);
        Comparison::new(stationary, original, simulated)
    }

    #[test]
    fn test_three_stacked_subplots() {
        let fig = scenario().plot();
        assert_eq!((fig.rows, fig.cols), (3, 1));
        assert_eq!(fig.subplots.len(), 3);

        let y_labels: Vec<_> = fig
            .subplots
            .iter()
            .map(|s| s.y_label.as_deref().unwrap())
            .collect();
        assert_eq!(y_labels, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_point_counts_match_timestamps() {
        let fig = scenario().plot();
        for subplot in &fig.subplots {
            let counts: Vec<_> = subplot.lines.iter().map(|l| l.len()).collect();
            assert_eq!(counts, vec![3, 5, 3]);
        }
    }

    #[test]
    fn test_legend_only_on_middle_row() {
        let fig = scenario().plot();
        let legends: Vec<_> = fig.legends().collect();
        assert_eq!(legends.len(), 1);

        let (row, legend) = legends[0];
        assert_eq!(row, 1);
        assert_eq!(legend.labels(), vec!["stationary", "original", "simulated"]);
    }

    #[test]
    fn test_time_label_only_on_last_row() {
        let fig = scenario().plot();
        assert_eq!(fig.subplots_with_x_label("Time (sec)"), vec![2]);
    }

    #[test]
    fn test_x_row_scenario() {
        let fig = scenario().plot();
        let x_row = &fig.subplots[0];

        let stat = x_row.line("stationary").unwrap();
        assert!(stat.y.iter().all(|&v| v == 0.0));

        let orig = x_row.line("original").unwrap();
        for (i, &v) in orig.y.iter().enumerate() {
            let expected = if i % 2 == 1 { 1.0 } else { 0.0 };
            assert_relative_eq!(v, expected, epsilon = 1e-12);
        }

        let sim = x_row.line("simulated").unwrap();
        assert_eq!(sim.value_at(0.99), Some(0.0));
        assert_relative_eq!(sim.value_at(1.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(sim.value_at(2.0).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_styles_follow_conditions() {
        let fig = scenario().plot();
        let colors: Vec<_> = fig.subplots[2].lines.iter().map(|l| l.color).collect();
        assert_eq!(colors, vec![Rgb::YELLOW, Rgb::BLACK, Rgb::RED]);

        let sizes: Vec<_> = fig.subplots[2].lines.iter().map(|l| l.marker_size).collect();
        assert_eq!(sizes, vec![5.0, 10.0, 5.0]);
    }

    #[test]
    fn test_style_override_changes_legend() {
        let overrides = StyleOverrides {
            original: Some(SeriesStyle {
                label: "reference".into(),
                color: Rgb(0, 0, 255),
                marker_size: 8.0,
            }),
            ..Default::default()
        };
        let fig = scenario().with_styles(&overrides).plot();
        let (_, legend) = fig.legends().next().unwrap();
        assert_eq!(legend.labels(), vec!["stationary", "reference", "simulated"]);
    }

    #[test]
    fn test_tight_limits_cover_all_conditions() {
        let fig = scenario().plot();
        let limits = fig.subplots[0].limits;
        assert_eq!(limits.x, (0.0, 2.0));
        assert_eq!(limits.y.0, 0.0);
        assert_relative_eq!(limits.y.1, 2.0, epsilon = 1e-12);
        // Y row is all zeros
        assert_eq!(fig.subplots[1].limits.y, (-0.5, 0.5));
    }

    #[test]
    fn test_plot_is_idempotent() {
        let comparison = scenario();
        assert_eq!(comparison.plot(), comparison.plot());
    }

    fn trajectory_strategy() -> impl Strategy<Value = Trajectory> {
        prop::collection::vec((0.001f64..1.0, -0.1f64..0.1, -0.1f64..0.1, -0.1f64..0.1), 1..40)
            .prop_map(|rows| {
                let mut t = 0.0;
                let mut times = Vec::with_capacity(rows.len());
                let mut translations = Vec::with_capacity(rows.len());
                for (dt, x, y, z) in rows {
                    t += dt;
                    times.push(t);
                    translations.push(Vector3::new(x, y, z));
                }
                Trajectory::from_translations(times, translations).unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_values_are_scaled_positions(
            stat in trajectory_strategy(),
            orig in trajectory_strategy(),
            sim in trajectory_strategy(),
        ) {
            let comparison = Comparison::new(stat, orig, sim);
            let fig = comparison.plot();

            for (row, axis) in Axis::ALL.iter().enumerate() {
                for (line, series) in fig.subplots[row].lines.iter().zip(comparison.series()) {
                    let traj = &series.trajectory;
                    prop_assert_eq!(line.len(), traj.len());
                    prop_assert_eq!(&line.x[..], traj.times());
                    for (plotted, pos) in line.y.iter().zip(traj.translations()) {
                        prop_assert_eq!(*plotted, 1000.0 * pos[axis.index()]);
                    }
                }
            }
        }
    }
}
