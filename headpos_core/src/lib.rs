//! HeadPos Core - Head-Position Trajectory Comparison
//!
//! Loads head-position logs estimated from cHPI coil fits and compares
//! three recordings of the same session:
//! 1. **Stationary**: simulated without movement
//! 2. **Original**: the reference positions replayed by the simulation
//! 3. **Simulated**: positions re-estimated from the movement simulation
//!
//! The comparison is built as an in-memory [`Figure`] (3 rows, one per
//! axis, step plots in millimeters) which can be rendered to SVG or
//! exported as JSON.

pub mod error;
pub mod trajectory;
pub mod headpos_io;
pub mod condition;
pub mod figure;
pub mod comparison;
pub mod render;
pub mod stats;

// Re-export key types for convenience
pub use error::{HeadPosError, Result};
pub use trajectory::{Axis, HeadPose, Trajectory, METERS_TO_MM};
pub use headpos_io::{format_head_pos, parse_head_pos, read_head_pos, write_head_pos};
pub use condition::{Condition, ConditionSeries, Rgb, SeriesStyle, StyleOverrides};
pub use figure::{AxisLimits, Figure, Legend, StepLine, Subplot};
pub use comparison::{Comparison, PlotConfig};
pub use render::{render_svg, render_svg_string, RenderOptions};
pub use stats::{Deviation, TrajectorySummary};
