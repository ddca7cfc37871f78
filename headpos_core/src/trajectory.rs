//! Head-position trajectories.
//!
//! A trajectory is an ordered series of head poses estimated from cHPI coil
//! fits. Translations are stored in meters; plots display millimeters.

use crate::error::{HeadPosError, Result};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Meters to millimeters.
pub const METERS_TO_MM: f64 = 1000.0;

/// Spatial axis of the head coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in column order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index into a translation vector.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Single-letter label used on plots.
    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single head pose sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    /// Head translation in meters
    pub translation: Vector3<f64>,

    /// Head rotation
    pub rotation: UnitQuaternion<f64>,

    /// Goodness of fit of the coil model
    pub goodness: f64,

    /// Fit error in meters
    pub error: f64,

    /// Head velocity in meters per second
    pub velocity: f64,
}

impl HeadPose {
    /// Creates a pose with only a translation (identity rotation, perfect fit).
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            rotation: UnitQuaternion::identity(),
            goodness: 1.0,
            error: 0.0,
            velocity: 0.0,
        }
    }

    fn is_finite(&self) -> bool {
        self.translation.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite())
            && self.goodness.is_finite()
            && self.error.is_finite()
            && self.velocity.is_finite()
    }
}

/// Time-stamped sequence of head poses.
///
/// Invariants, checked at construction:
/// - at least one sample
/// - one pose per timestamp
/// - timestamps strictly increasing
/// - all values finite
///
/// Trajectories are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    times: Vec<f64>,
    poses: Vec<HeadPose>,
}

impl Trajectory {
    /// Builds a validated trajectory.
    pub fn new(times: Vec<f64>, poses: Vec<HeadPose>) -> Result<Self> {
        if times.len() != poses.len() {
            return Err(HeadPosError::LengthMismatch {
                times: times.len(),
                poses: poses.len(),
            });
        }
        if times.is_empty() {
            return Err(HeadPosError::EmptyTrajectory);
        }
        for (index, (t, pose)) in times.iter().zip(&poses).enumerate() {
            if !t.is_finite() || !pose.is_finite() {
                return Err(HeadPosError::NonFinite { index });
            }
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(HeadPosError::NonMonotonicTime { index: index + 1 });
        }

        Ok(Self { times, poses })
    }

    /// Builds a trajectory from translations only (meters).
    pub fn from_translations(times: Vec<f64>, translations: Vec<Vector3<f64>>) -> Result<Self> {
        let poses = translations
            .into_iter()
            .map(HeadPose::from_translation)
            .collect();
        Self::new(times, poses)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a constructed trajectory.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample timestamps in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Head poses, one per timestamp.
    pub fn poses(&self) -> &[HeadPose] {
        &self.poses
    }

    /// Iterator over translations in meters.
    pub fn translations(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.poses.iter().map(|p| &p.translation)
    }

    /// One translation column in meters.
    pub fn axis(&self, axis: Axis) -> Vec<f64> {
        self.axis_scaled(axis, 1.0)
    }

    /// One translation column multiplied by `factor`.
    pub fn axis_scaled(&self, axis: Axis, factor: f64) -> Vec<f64> {
        let i = axis.index();
        self.translations().map(|v| factor * v[i]).collect()
    }

    /// First timestamp.
    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    /// Last timestamp.
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Time between first and last sample.
    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Index of the sample in effect at time `t` under a post-step hold.
    ///
    /// Returns `None` before the first sample. After the last sample the last
    /// value holds indefinitely.
    pub fn sample_index_at(&self, t: f64) -> Option<usize> {
        // Number of timestamps <= t
        let count = self.times.partition_point(|&ti| ti <= t);
        count.checked_sub(1)
    }

    /// Translation in effect at time `t` (post-step hold).
    pub fn value_at(&self, t: f64) -> Option<Vector3<f64>> {
        self.sample_index_at(t).map(|i| self.poses[i].translation)
    }
}
