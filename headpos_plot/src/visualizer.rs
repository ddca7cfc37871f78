//! Rerun streaming of head-position trajectories.
//!
//! Streaming is optional and only available with the `visualization`
//! feature. Each condition is logged as three scalar series on the
//! `time` timeline:
//!
//! - `head_pos/<condition>/X`
//! - `head_pos/<condition>/Y`
//! - `head_pos/<condition>/Z`
//!
//! Values are in millimeters, matching the SVG figure.

use headpos_core::{ConditionSeries, Deviation};
#[cfg(feature = "visualization")]
use headpos_core::{Axis, METERS_TO_MM};
#[cfg(feature = "visualization")]
use rerun::{RecordingStream, Scalar, SeriesLine};

/// Rerun logger for head-position comparisons.
pub struct RerunLogger {
    #[cfg(feature = "visualization")]
    rec: Option<RecordingStream>,

    /// Whether visualization is enabled
    enabled: bool,
}

impl RerunLogger {
    /// Creates a new logger with visualization disabled.
    pub fn disabled() -> Self {
        Self {
            #[cfg(feature = "visualization")]
            rec: None,
            enabled: false,
        }
    }

    /// Creates a new logger with visualization enabled.
    #[cfg(feature = "visualization")]
    pub fn new(name: &str) -> Self {
        match rerun::RecordingStreamBuilder::new(name).spawn() {
            Ok(rec) => {
                tracing::info!("Rerun visualization enabled - open Rerun Viewer to see trajectories");
                Self {
                    rec: Some(rec),
                    enabled: true,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize Rerun: {:?}", e);
                Self::disabled()
            }
        }
    }

    /// Creates a logger - returns disabled if visualization feature not enabled.
    #[cfg(not(feature = "visualization"))]
    pub fn new(_name: &str) -> Self {
        tracing::info!("Rerun visualization not available (compile with --features visualization)");
        Self::disabled()
    }

    /// Returns whether visualization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs one condition's trajectory, one scalar series per axis.
    #[cfg(feature = "visualization")]
    pub fn log_series(&self, series: &ConditionSeries) {
        let Some(ref rec) = self.rec else {
            return;
        };
        let color = series.style.color;

        for axis in Axis::ALL {
            let path = format!("head_pos/{}/{}", series.condition.name(), axis.label());
            let _ = rec.log_static(
                path.as_str(),
                &SeriesLine::new()
                    .with_color([color.0, color.1, color.2])
                    .with_name(series.style.label.as_str()),
            );

            let values = series.trajectory.axis_scaled(axis, METERS_TO_MM);
            for (&t, value) in series.trajectory.times().iter().zip(values) {
                rec.set_time_seconds("time", t);
                let _ = rec.log(path.as_str(), &Scalar::new(value));
            }
        }
    }

    #[cfg(not(feature = "visualization"))]
    pub fn log_series(&self, _series: &ConditionSeries) {}

    /// Logs a deviation summary as a text entry.
    #[cfg(feature = "visualization")]
    pub fn log_deviation(&self, label: &str, deviation: &Deviation) {
        if let Some(ref rec) = self.rec {
            let _ = rec.log(
                format!("reports/{}", label),
                &rerun::TextLog::new(format!(
                    "{}: rms {:.3} mm, max {:.3} mm over {} samples",
                    label, deviation.rms_total_mm, deviation.max_mm, deviation.compared_samples
                )),
            );
        }
    }

    #[cfg(not(feature = "visualization"))]
    pub fn log_deviation(&self, _label: &str, _deviation: &Deviation) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use headpos_core::{Condition, Trajectory};
    use nalgebra::Vector3;

    #[test]
    fn test_disabled_logger() {
        let logger = RerunLogger::disabled();
        assert!(!logger.is_enabled());

        // These should be no-ops
        let traj = Trajectory::from_translations(vec![0.0], vec![Vector3::zeros()]).unwrap();
        logger.log_series(&ConditionSeries::new(Condition::Original, traj));
        logger.log_deviation("simulated", &Deviation::default());
    }
}
