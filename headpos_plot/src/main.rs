//! HeadPos comparison CLI
//!
//! Plot stationary, original and simulated head positions side by side.

use anyhow::{Context, Result};
use clap::Parser;
use headpos_core::{render_svg, Condition, PlotConfig, RenderOptions};
use headpos_plot::{ComparisonSession, RerunLogger, SessionInputs};
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Head-position comparison for movement simulations
#[derive(Parser, Debug)]
#[command(name = "headpos-plot")]
#[command(about = "Compare stationary, original and simulated head-position logs", long_about = None)]
struct Args {
    /// Head positions estimated from the recording simulated without movement
    #[arg(long)]
    stationary: PathBuf,

    /// Head positions the movement simulation replayed
    #[arg(long)]
    original: PathBuf,

    /// Head positions estimated from the recording simulated with movement
    #[arg(long)]
    simulated: PathBuf,

    /// SVG file to write the figure to
    #[arg(short, long, default_value = "head_position_comparison.svg")]
    output: PathBuf,

    /// Export summaries and figure data to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// JSON file with per-condition style overrides
    #[arg(long)]
    style: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value = "1024")]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value = "768")]
    height: u32,

    /// Figure title
    #[arg(long)]
    title: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Stream trajectories to a Rerun viewer
    #[arg(long)]
    rerun: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    // stdout is reserved for --json
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Runs one comparison. The `--json` summary goes to `out`.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let session = ComparisonSession::load(SessionInputs {
        stationary: args.stationary.clone(),
        original: args.original.clone(),
        simulated: args.simulated.clone(),
        style: args.style.clone(),
    })?;

    let figure = session.figure(&PlotConfig::default());
    let options = RenderOptions {
        width: args.width,
        height: args.height,
        title: args.title.clone(),
    };
    render_svg(&figure, &args.output, &options)
        .with_context(|| format!("Failed to render {}", args.output.display()))?;
    info!("Figure written to {}", args.output.display());

    let report = session.report();

    if args.rerun {
        let logger = RerunLogger::new("headpos-plot");
        if logger.is_enabled() {
            for series in session.comparison.series() {
                logger.log_series(series);
            }
            for r in &report.conditions {
                if let Some(dev) = &r.deviation_from_original {
                    logger.log_deviation(&r.label, dev);
                }
            }
        }
    }

    if args.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        for r in &report.conditions {
            let s = &r.summary;
            info!(
                "{:<10} {:>5} samples over {:>7.1}s | max displacement {:.2} mm | path {:.2} mm",
                r.label, s.samples, s.duration_sec, s.max_displacement_mm, s.path_length_mm
            );
            if let Some(dev) = &r.deviation_from_original {
                info!(
                    "{:<10} vs {}: rms [{:.2}, {:.2}, {:.2}] mm | max {:.2} mm ({} samples)",
                    r.label,
                    Condition::Original,
                    dev.rms_mm[0],
                    dev.rms_mm[1],
                    dev.rms_mm[2],
                    dev.max_mm,
                    dev.compared_samples
                );
            }
        }
    }

    if let Some(path) = &args.export {
        report
            .with_figure(figure)
            .write_to_file(path)
            .with_context(|| format!("Failed to write export {}", path.display()))?;
        info!("Exported comparison to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args, &mut std::io::stdout()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn args_with(extra: &[&str]) -> Args {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let mut argv = vec![
            "headpos-plot".to_string(),
            "--stationary".to_string(),
            data.join("hp_stat.txt").display().to_string(),
            "--original".to_string(),
            data.join("subj_01_funloc_hp_trunc.txt").display().to_string(),
            "--simulated".to_string(),
            data.join("hp_move.txt").display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn test_json_summary_on_output() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("fig.svg");
        let args = args_with(&["--json", "--output", svg.to_str().unwrap()]);

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let conditions = value["conditions"].as_array().unwrap();
        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[2]["condition"], "simulated");
        assert_eq!(conditions[2]["summary"]["samples"], 25);
        assert!(value.get("figure").is_none());
        assert!(svg.exists());
    }

    #[test]
    fn test_svg_and_export_written() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("fig.svg");
        let export = dir.path().join("comparison.json");
        let args = args_with(&[
            "--output",
            svg.to_str().unwrap(),
            "--export",
            export.to_str().unwrap(),
            "--title",
            "Run 01",
        ]);

        let mut out = Vec::new();
        run(&args, &mut out).unwrap();
        // Without --json the summary only goes to the log
        assert!(out.is_empty());

        let svg_text = std::fs::read_to_string(&svg).unwrap();
        assert!(svg_text.contains("</svg>"));
        assert!(svg_text.contains("Run 01"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(value["conditions"].as_array().unwrap().len(), 3);
        assert_eq!(value["figure"]["subplots"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_log_fails_without_output() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("fig.svg");
        let mut args = args_with(&["--output", svg.to_str().unwrap()]);
        args.original = dir.path().join("missing.txt");

        let err = run(&args, &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.txt"));
        assert!(!svg.exists());
    }
}
