//! MaxFilter head-position log reader and writer.
//!
//! Logs written by `maxfilter -headpos -hp <file>` hold one row per cHPI fit:
//!
//! ```text
//!  Time       q1       q2       q3       q4       q5       q6   g-value    error  velocity
//!    10.000  0.00187 -0.00413  0.00051  0.00211  0.00635  0.04384  0.99822  0.00213  0.00018
//! ```
//!
//! `q1..q3` are the vector part of a unit rotation quaternion and `q4..q6`
//! the head translation in meters.

use crate::error::{HeadPosError, Result};
use crate::trajectory::{HeadPose, Trajectory};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Columns per data row.
pub const HEAD_POS_COLUMNS: usize = 10;

/// Allowed overshoot of the squared norm of `q1..q3` past 1 before a row is
/// considered corrupt.
pub const ROTATION_NORM_TOLERANCE: f64 = 1e-3;

/// Header written at the top of generated logs.
pub const HEAD_POS_HEADER: &str =
    " Time       q1       q2       q3       q4       q5       q6   g-value    error  velocity";

/// Reads a head-position log from disk.
pub fn read_head_pos(path: impl AsRef<Path>) -> Result<Trajectory> {
    let text = std::fs::read_to_string(path)?;
    parse_head_pos(&text)
}

/// Parses the text of a head-position log.
pub fn parse_head_pos(text: &str) -> Result<Trajectory> {
    let mut times = Vec::new();
    let mut poses = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();

        // Header rows hold column names only and precede all data
        if times.is_empty() && tokens.iter().all(|t| t.parse::<f64>().is_err()) {
            continue;
        }

        if tokens.len() != HEAD_POS_COLUMNS {
            return Err(HeadPosError::ColumnCount {
                line: line_no,
                expected: HEAD_POS_COLUMNS,
                found: tokens.len(),
            });
        }

        let mut row = [0.0f64; HEAD_POS_COLUMNS];
        for (slot, token) in row.iter_mut().zip(&tokens) {
            *slot = token
                .parse()
                .map_err(|_| HeadPosError::parse(line_no, format!("invalid number '{}'", token)))?;
        }

        let norm_sq = row[1] * row[1] + row[2] * row[2] + row[3] * row[3];
        if norm_sq > 1.0 + ROTATION_NORM_TOLERANCE {
            return Err(HeadPosError::parse(
                line_no,
                format!("rotation vector part has norm {:.6} > 1", norm_sq.sqrt()),
            ));
        }

        times.push(row[0]);
        poses.push(HeadPose {
            rotation: rotation_from_vector_part(row[1], row[2], row[3]),
            translation: Vector3::new(row[4], row[5], row[6]),
            goodness: row[7],
            error: row[8],
            velocity: row[9],
        });
    }

    Trajectory::new(times, poses)
}

/// Rebuilds a unit quaternion from its vector part.
///
/// The scalar part is taken as non-negative. Overshoots of the unit norm are
/// clamped to a zero scalar part; the log reader rejects rows whose overshoot
/// exceeds [`ROTATION_NORM_TOLERANCE`].
pub fn rotation_from_vector_part(q1: f64, q2: f64, q3: f64) -> UnitQuaternion<f64> {
    let w = (1.0 - (q1 * q1 + q2 * q2 + q3 * q3)).max(0.0).sqrt();
    UnitQuaternion::from_quaternion(Quaternion::new(w, q1, q2, q3))
}

/// Formats a trajectory as a head-position log.
pub fn format_head_pos(trajectory: &Trajectory) -> String {
    let mut out = String::with_capacity(96 * (trajectory.len() + 1));
    out.push_str(HEAD_POS_HEADER);
    out.push('\n');

    for (t, pose) in trajectory.times().iter().zip(trajectory.poses()) {
        // Keep the scalar part positive so the vector part alone is enough
        let q = if pose.rotation.w < 0.0 {
            -pose.rotation.into_inner()
        } else {
            pose.rotation.into_inner()
        };
        let v = &pose.translation;
        // Shortest round-trip form so closely spaced samples stay distinct
        out.push_str(&format!(
            "{:>10} {:8.5} {:8.5} {:8.5} {:8.5} {:8.5} {:8.5} {:8.5} {:8.5} {:8.5}\n",
            t, q.i, q.j, q.k, v.x, v.y, v.z, pose.goodness, pose.error, pose.velocity,
        ));
    }
    out
}

/// Writes a trajectory as a head-position log.
pub fn write_head_pos(path: impl AsRef<Path>, trajectory: &Trajectory) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_head_pos(trajectory).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
 Time       q1       q2       q3       q4       q5       q6   g-value    error  velocity
    10.000  0.00187 -0.00413  0.00051  0.00211  0.00635  0.04384  0.99822  0.00213  0.00018
    11.000  0.00190 -0.00410  0.00052  0.00215  0.00631  0.04390  0.99830  0.00210  0.00020
# operator note
    12.000  0.00188 -0.00415  0.00050  0.00209  0.00640  0.04381  0.99801  0.00222  0.00031
";

    #[test]
    fn test_parse_sample_log() {
        let traj = parse_head_pos(SAMPLE).unwrap();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.times(), &[10.0, 11.0, 12.0]);

        let first = &traj.poses()[0];
        assert_relative_eq!(first.translation.x, 0.00211);
        assert_relative_eq!(first.translation.z, 0.04384);
        assert_relative_eq!(first.goodness, 0.99822);
        assert_relative_eq!(first.velocity, 0.00018);
    }

    #[test]
    fn test_quaternion_scalar_part() {
        let q = rotation_from_vector_part(0.1, 0.2, 0.3);
        assert_relative_eq!(q.w, (1.0f64 - 0.14).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(q.i, 0.1, epsilon = 1e-12);

        let identity = rotation_from_vector_part(0.0, 0.0, 0.0);
        assert_relative_eq!(identity.angle(), 0.0);
    }

    #[test]
    fn test_wrong_column_count_reports_line() {
        let text = "1.0 0 0 0 0 0 0 1 0 0\n2.0 0 0 0 0 0\n";
        match parse_head_pos(text) {
            Err(HeadPosError::ColumnCount { line, found, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(found, 6);
            }
            other => panic!("expected column count error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = "% comment\n1.0 0 0 0 0 0 0 1 0 0\n2.0 0 0 0 abc 0 0 1 0 0\n";
        assert!(matches!(
            parse_head_pos(text),
            Err(HeadPosError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_malformed_first_row_is_not_a_header() {
        let text = "1.0x 0 0 0 0.005 0 0 1 0 0\n2.0 0 0 0 0 0 0 1 0 0\n";
        assert!(matches!(
            parse_head_pos(text),
            Err(HeadPosError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_header_after_data_is_an_error() {
        let text = format!("1.0 0 0 0 0 0 0 1 0 0\n{}\n", HEAD_POS_HEADER);
        assert!(matches!(
            parse_head_pos(&text),
            Err(HeadPosError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_rotation_norm_above_one() {
        let text = "1.0 0.8 0.8 0.0 0 0 0 1 0 0\n";
        assert!(matches!(
            parse_head_pos(text),
            Err(HeadPosError::Parse { line: 1, .. })
        ));

        // Rounding noise just past the unit norm is accepted
        let q = (1.0f64 / 3.0).sqrt() + 1e-6;
        let noisy = format!("1.0 {q} {q} {q} 0 0 0 1 0 0\n");
        let traj = parse_head_pos(&noisy).unwrap();
        assert_relative_eq!(traj.poses()[0].rotation.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sub_millisecond_times_survive_formatting() {
        let times = vec![0.0, 0.0004, 0.0008, 12.345678901];
        let traj = Trajectory::from_translations(times.clone(), vec![Vector3::zeros(); 4]).unwrap();

        let reread = parse_head_pos(&format_head_pos(&traj)).unwrap();
        assert_eq!(reread.times(), &times[..]);
    }

    #[test]
    fn test_header_only_is_empty() {
        let text = format!("{}\n", HEAD_POS_HEADER);
        assert!(matches!(
            parse_head_pos(&text),
            Err(HeadPosError::EmptyTrajectory)
        ));
    }

    #[test]
    fn test_write_then_read() {
        let traj = parse_head_pos(SAMPLE).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("hp.txt");

        write_head_pos(&path, &traj).unwrap();
        let reread = read_head_pos(&path).unwrap();

        assert_eq!(reread.times(), traj.times());
        for (a, b) in reread.poses().iter().zip(traj.poses()) {
            assert_relative_eq!(a.translation, b.translation, epsilon = 1e-5);
            assert_relative_eq!(a.rotation.i, b.rotation.i, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_head_pos("/nonexistent/hp_move.txt"),
            Err(HeadPosError::Io(_))
        ));
    }
}
