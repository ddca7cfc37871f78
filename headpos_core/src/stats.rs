//! Trajectory Statistics
//! =====================
//!
//! Summaries used to judge how well a movement simulation reproduced the
//! head positions it replayed:
//! - **Summary**: per-axis range and mean, peak displacement, path length
//! - **Deviation**: RMS and peak difference between a candidate trajectory
//!   and a reference, sampled at the reference timestamps
//!
//! All distances are reported in millimeters.

use crate::trajectory::{Axis, Trajectory, METERS_TO_MM};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// =============================================================================
// SUMMARY
// =============================================================================

/// Descriptive statistics of one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    /// Number of samples
    pub samples: usize,
    /// Time between first and last sample (seconds)
    pub duration_sec: f64,
    /// Per-axis mean position (mm)
    pub mean_mm: [f64; 3],
    /// Per-axis minimum position (mm)
    pub min_mm: [f64; 3],
    /// Per-axis maximum position (mm)
    pub max_mm: [f64; 3],
    /// Largest Euclidean distance from the first sample (mm)
    pub max_displacement_mm: f64,
    /// Sum of distances between consecutive samples (mm)
    pub path_length_mm: f64,
}

impl TrajectorySummary {
    /// Computes the summary of a trajectory.
    pub fn of(trajectory: &Trajectory) -> Self {
        let n = trajectory.len();
        let mut mean_mm = [0.0; 3];
        let mut min_mm = [f64::INFINITY; 3];
        let mut max_mm = [f64::NEG_INFINITY; 3];

        for axis in Axis::ALL {
            let i = axis.index();
            let values = trajectory.axis_scaled(axis, METERS_TO_MM);
            mean_mm[i] = values.iter().sum::<f64>() / n as f64;
            for v in values {
                min_mm[i] = min_mm[i].min(v);
                max_mm[i] = max_mm[i].max(v);
            }
        }

        let translations: Vec<&Vector3<f64>> = trajectory.translations().collect();
        let origin = translations[0];
        let max_displacement_mm = translations
            .iter()
            .map(|p| (*p - origin).norm() * METERS_TO_MM)
            .fold(0.0, f64::max);
        let path_length_mm = translations
            .windows(2)
            .map(|w| (w[1] - w[0]).norm() * METERS_TO_MM)
            .sum();

        Self {
            samples: n,
            duration_sec: trajectory.duration(),
            mean_mm,
            min_mm,
            max_mm,
            max_displacement_mm,
            path_length_mm,
        }
    }
}

// =============================================================================
// DEVIATION
// =============================================================================

/// Difference between a candidate trajectory and a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// Reference samples that fell inside the candidate's time span
    pub compared_samples: usize,
    /// Per-axis root-mean-square difference (mm)
    pub rms_mm: [f64; 3],
    /// RMS of the Euclidean difference (mm)
    pub rms_total_mm: f64,
    /// Largest Euclidean difference (mm)
    pub max_mm: f64,
}

impl Deviation {
    /// Compares `candidate` against `reference`.
    ///
    /// The candidate is read with a post-step hold at every reference
    /// timestamp between its first and last sample. With no overlap the
    /// result has zero compared samples and zero errors.
    pub fn between(reference: &Trajectory, candidate: &Trajectory) -> Self {
        let start = candidate.start_time();
        let end = candidate.end_time();

        let mut sum_sq = Vector3::<f64>::zeros();
        let mut max_mm: f64 = 0.0;
        let mut compared = 0usize;

        for (&t, pose) in reference.times().iter().zip(reference.poses()) {
            if t < start || t > end {
                continue;
            }
            let Some(value) = candidate.value_at(t) else {
                continue;
            };
            let diff_mm = (value - pose.translation) * METERS_TO_MM;
            sum_sq += diff_mm.component_mul(&diff_mm);
            max_mm = max_mm.max(diff_mm.norm());
            compared += 1;
        }

        if compared == 0 {
            return Self::default();
        }

        let mean_sq = sum_sq / compared as f64;
        Self {
            compared_samples: compared,
            rms_mm: [mean_sq.x.sqrt(), mean_sq.y.sqrt(), mean_sq.z.sqrt()],
            rms_total_mm: mean_sq.sum().sqrt(),
            max_mm,
        }
    }
}
