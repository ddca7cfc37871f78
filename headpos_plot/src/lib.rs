//! HeadPos Plot - compare head-position logs from a movement simulation
//!
//! Glue between the command line and `headpos_core`:
//! - **Session**: loads the stationary, original and simulated logs
//! - **Exporter**: JSON summaries, deviations and figure data
//! - **Visualizer**: optional Rerun stream (`visualization` feature)
//!
//! # Usage
//!
//! ```ignore
//! use headpos_plot::{ComparisonSession, SessionInputs};
//!
//! let session = ComparisonSession::load(SessionInputs {
//!     stationary: "hp_stat.txt".into(),
//!     original: "subj_01_funloc_hp_trunc.txt".into(),
//!     simulated: "hp_move.txt".into(),
//!     style: None,
//! })?;
//! let figure = session.figure(&Default::default());
//! ```

mod exporter;
mod session;
mod visualizer;

pub use exporter::{ComparisonExport, ConditionReport};
pub use session::{ComparisonSession, SessionInputs};
pub use visualizer::RerunLogger;
