//! Correlation Heatmap Module
//! Pairwise Pearson coefficients as a colored grid with two-decimal
//! annotations over a diverging blue-white-red scale.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use super::RenderError;
use crate::stats::CorrelationMatrix;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

// Diverging scale endpoints (cool blue through white to warm red)
const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (242, 242, 242);
const WARM: (u8, u8, u8) = (180, 4, 38);
const MISSING: RGBColor = RGBColor(200, 200, 200);

/// Render the correlation matrix as a PNG.
pub fn render_correlation_heatmap(
    matrix: &CorrelationMatrix,
    title: &str,
    path: &Path,
) -> Result<(), RenderError> {
    let n = matrix.columns.len();
    if n == 0 {
        return Err(RenderError::EmptySeries);
    }
    debug!(columns = n, path = %path.display(), "Rendering correlation heatmap");

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(to_render_error)?;

    // Cells centered on integer coordinates, so the axis ticks land on cell
    // centers and can carry the column names.
    let extent = n as f64 - 0.5;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(90)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5f64..extent, -0.5f64..extent)
        .map_err(to_render_error)?;

    let x_names = matrix.columns.clone();
    let y_names = matrix.columns.clone();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&move |v| name_at(*v, &x_names))
        .y_label_formatter(&move |v| name_at(*v, &y_names))
        .draw()
        .map_err(to_render_error)?;

    let annotation = TextStyle::from(("sans-serif", 16).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (i, row) in matrix.values.iter().enumerate() {
        for (j, &r) in row.iter().enumerate() {
            let x = j as f64;
            let y = i as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    diverging_color(r).filled(),
                )))
                .map_err(to_render_error)?;

            let label = if r.is_nan() {
                "-".to_string()
            } else {
                format!("{r:.2}")
            };
            let color = if r.is_finite() && r.abs() > 0.6 {
                &WHITE
            } else {
                &BLACK
            };
            chart
                .draw_series(std::iter::once(Text::new(
                    label,
                    (x, y),
                    annotation.color(color),
                )))
                .map_err(to_render_error)?;
        }
    }

    root.present().map_err(to_render_error)?;
    Ok(())
}

/// Column name for an axis tick when the tick falls on a cell center.
fn name_at(v: f64, names: &[String]) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

/// Map a coefficient in [-1, 1] onto the diverging scale.
fn diverging_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return MISSING;
    }
    let t = r.clamp(-1.0, 1.0);
    let (from, to, f) = if t < 0.0 {
        (NEUTRAL, COOL, -t)
    } else {
        (NEUTRAL, WARM, t)
    };
    RGBColor(
        lerp(from.0, to.0, f),
        lerp(from.1, to.1, f),
        lerp(from.2, to.2, f),
    )
}

fn lerp(from: u8, to: u8, f: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * f).round() as u8
}

fn to_render_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}
