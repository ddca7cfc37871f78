//! SVG rendering of a [`Figure`] with `plotters`.

use crate::condition::Rgb;
use crate::error::{HeadPosError, Result};
use crate::figure::{Figure, Subplot};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixels per typographic point at 100 dpi.
const PX_PER_POINT: f64 = 100.0 / 72.0;

/// Output size and decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: None,
        }
    }
}

/// Renders the figure to an SVG file.
pub fn render_svg(figure: &Figure, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let root = SVGBackend::new(path.as_ref(), (options.width, options.height)).into_drawing_area();
    draw_figure(&root, figure, options)?;
    root.present().map_err(HeadPosError::render)?;
    Ok(())
}

/// Renders the figure to an SVG document in memory.
pub fn render_svg_string(figure: &Figure, options: &RenderOptions) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw_figure(&root, figure, options)?;
        root.present().map_err(HeadPosError::render)?;
    }
    Ok(svg)
}

/// Marker radius in pixels for a marker diameter in points.
pub fn marker_radius(marker_size: f64) -> i32 {
    (marker_size * PX_PER_POINT / 2.0).round().max(1.0) as i32
}

fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    options: &RenderOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(HeadPosError::render)?;

    let area = match &options.title {
        Some(title) => root
            .titled(title, ("sans-serif", 24))
            .map_err(HeadPosError::render)?,
        None => root.clone(),
    };

    let panels = area.split_evenly((figure.rows, figure.cols));
    for (panel, subplot) in panels.iter().zip(&figure.subplots) {
        draw_subplot(panel, subplot)?;
    }
    Ok(())
}

fn draw_subplot<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, subplot: &Subplot) -> Result<()> {
    let limits = subplot.limits;
    let x_label_area = if subplot.x_label.is_some() { 40 } else { 25 };

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .x_label_area_size(x_label_area)
        .y_label_area_size(50)
        .build_cartesian_2d(limits.x.0..limits.x.1, limits.y.0..limits.y.1)
        .map_err(HeadPosError::render)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(10).y_labels(5).label_style(("sans-serif", 12));
        if let Some(label) = &subplot.y_label {
            mesh.y_desc(label.as_str());
        }
        if let Some(label) = &subplot.x_label {
            mesh.x_desc(label.as_str());
        }
        mesh.draw().map_err(HeadPosError::render)?;
    }

    let with_legend = subplot.legend.is_some();
    for line in &subplot.lines {
        let color = to_rgb(line.color);
        let radius = marker_radius(line.marker_size);

        let anno = chart
            .draw_series(LineSeries::new(line.step_path(), color.stroke_width(1)))
            .map_err(HeadPosError::render)?;
        if with_legend {
            // Line segment with the series marker on top, offsets relative to the entry
            anno.label(line.label.as_str()).legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(-10, 0), (10, 0)], color.stroke_width(2))
                    + Circle::new((0, 0), radius, color.filled())
            });
        }

        chart
            .draw_series(line.points().map(|p| Circle::new(p, radius, color.filled())))
            .map_err(HeadPosError::render)?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 12))
            .draw()
            .map_err(HeadPosError::render)?;
    }

    Ok(())
}
