//! Trend Chart Module
//! Line chart of the per-year indicator mean, with point markers and a grid.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use super::RenderError;
use crate::stats::YearlyMean;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render the yearly trend as a PNG.
pub fn render_trend_chart(
    series: &[YearlyMean],
    title: &str,
    path: &Path,
) -> Result<(), RenderError> {
    if series.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    debug!(points = series.len(), path = %path.display(), "Rendering trend chart");

    let (x_range, y_range) = axis_ranges(series);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(to_render_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Mortality Rate (per 1,000 live births)")
        .x_labels(series.len().max(2))
        .x_label_formatter(&|year| format!("{year}"))
        .draw()
        .map_err(to_render_error)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|p| (p.year as i32, p.mean)),
            LINE_COLOR.stroke_width(2),
        ))
        .map_err(to_render_error)?;

    chart
        .draw_series(
            series
                .iter()
                .map(|p| Circle::new((p.year as i32, p.mean), 4, LINE_COLOR.filled())),
        )
        .map_err(to_render_error)?;

    root.present().map_err(to_render_error)?;
    Ok(())
}

/// Year range padded by one on each side for a single point, value range
/// padded by 15% like the interactive originals.
fn axis_ranges(series: &[YearlyMean]) -> (std::ops::Range<i32>, std::ops::Range<f64>) {
    let mut x_min = i32::MAX;
    let mut x_max = i32::MIN;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for p in series {
        x_min = x_min.min(p.year as i32);
        x_max = x_max.max(p.year as i32);
        y_min = y_min.min(p.mean);
        y_max = y_max.max(p.mean);
    }

    if x_min == x_max {
        x_min -= 1;
        x_max += 1;
    }

    let pad = ((y_max - y_min) * 0.15).max(1.0);
    (x_min..x_max + 1, (y_min - pad)..(y_max + pad))
}

fn to_render_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}
