//! Charts module - static PNG rendering

mod heatmap;
mod plotter;

pub use heatmap::render_correlation_heatmap;
pub use plotter::render_trend_chart;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("rendering failed: {0}")]
    Backend(String),
    #[error("no data points to chart")]
    EmptySeries,
}
