//! In-memory figure model.
//!
//! A [`Figure`] is a backend-independent description of what gets drawn:
//! a grid of subplots, each holding step lines, optional axis labels and an
//! optional legend. Rendering lives in [`crate::render`].

use crate::condition::Rgb;
use serde::{Deserialize, Serialize};

/// Where a step line changes value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// Value holds from each sample until the next sample's x
    Post,
}

/// Marker drawn at each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
}

/// A step-function line with markers at its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLine {
    pub label: String,
    pub color: Rgb,
    pub marker: Marker,
    pub marker_size: f64,
    pub step: StepMode,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl StepLine {
    /// Number of plotted samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Sample points as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Vertices of the drawn polyline.
    ///
    /// For `n` samples the post-step path has `2n - 1` vertices: each sample
    /// is followed by a horizontal run to the next sample's x.
    pub fn step_path(&self) -> Vec<(f64, f64)> {
        let mut path = Vec::with_capacity(self.len().saturating_mul(2));
        let mut prev_y = None;
        for (x, y) in self.points() {
            if let Some(py) = prev_y {
                match self.step {
                    StepMode::Post => path.push((x, py)),
                }
            }
            path.push((x, y));
            prev_y = Some(y);
        }
        path
    }

    /// Value drawn at `x`, or `None` before the first sample.
    pub fn value_at(&self, x: f64) -> Option<f64> {
        let count = self.x.partition_point(|&xi| xi <= x);
        count.checked_sub(1).map(|i| self.y[i])
    }

    /// `(min, max)` of x and y, or `None` if empty.
    pub fn extent(&self) -> Option<((f64, f64), (f64, f64))> {
        let x = min_max(self.x.iter().copied())?;
        let y = min_max(self.y.iter().copied())?;
        Some((x, y))
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub marker_size: f64,
}

/// Legend listing lines in plot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Builds a legend from lines, in the order they were plotted.
    pub fn from_lines(lines: &[StepLine]) -> Self {
        Self {
            entries: lines
                .iter()
                .map(|l| LegendEntry {
                    label: l.label.clone(),
                    color: l.color,
                    marker_size: l.marker_size,
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

/// Axis ranges of a subplot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl AxisLimits {
    /// Padding applied when a range collapses to a single value.
    pub const DEGENERATE_PAD: f64 = 0.5;

    /// Tight limits around all lines' data.
    ///
    /// Falls back to `[-0.5, 0.5]` on both axes when there is no data.
    pub fn tight(lines: &[StepLine]) -> Self {
        let mut x = None;
        let mut y = None;
        for (lx, ly) in lines.iter().filter_map(StepLine::extent) {
            x = Some(merge(x, lx));
            y = Some(merge(y, ly));
        }
        Self {
            x: widen(x.unwrap_or((0.0, 0.0))),
            y: widen(y.unwrap_or((0.0, 0.0))),
        }
    }

    /// Limits with a relative margin on each side of both ranges.
    pub fn with_margin(self, fraction: f64) -> Self {
        let pad = |(lo, hi): (f64, f64)| {
            let m = (hi - lo) * fraction;
            (lo - m, hi + m)
        };
        Self {
            x: pad(self.x),
            y: pad(self.y),
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn merge(acc: Option<(f64, f64)>, (lo, hi): (f64, f64)) -> (f64, f64) {
    match acc {
        None => (lo, hi),
        Some((a, b)) => (a.min(lo), b.max(hi)),
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - AxisLimits::DEGENERATE_PAD, hi + AxisLimits::DEGENERATE_PAD)
    }
}

/// A single panel of the figure grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subplot {
    /// Zero-based position in row-major grid order
    pub index: usize,
    pub y_label: Option<String>,
    pub x_label: Option<String>,
    pub lines: Vec<StepLine>,
    pub legend: Option<Legend>,
    pub limits: AxisLimits,
}

impl Subplot {
    /// Total number of plotted samples across lines.
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(StepLine::len).sum()
    }

    /// Line with the given label.
    pub fn line(&self, label: &str) -> Option<&StepLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}

/// A grid of subplots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    pub subplots: Vec<Subplot>,
}

impl Figure {
    /// Subplots that carry a legend.
    pub fn legends(&self) -> impl Iterator<Item = (usize, &Legend)> + '_ {
        self.subplots
            .iter()
            .filter_map(|s| s.legend.as_ref().map(|l| (s.index, l)))
    }

    /// Indices of subplots with the given x-axis label.
    pub fn subplots_with_x_label(&self, label: &str) -> Vec<usize> {
        self.subplots
            .iter()
            .filter(|s| s.x_label.as_deref() == Some(label))
            .map(|s| s.index)
            .collect()
    }

    /// Serializes the figure to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
