//! Data module - dataset loading, cleaning and CSV export

mod api;
mod export;
mod loader;
mod processor;

use polars::prelude::PolarsError;
use thiserror::Error;

pub use api::{fetch_indicator, WORLD_BANK_URL};
pub use export::{read_rows, write_frame, ExportError, MortalityRow};
pub use loader::load_workbook;
pub use processor::{DataProcessor, FilterError, WINDOW_END, WINDOW_START};

/// Failure to obtain a Dataset from either source (file or HTTP API).
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("source unavailable: file not found: {0}")]
    FileNotFound(String),
    #[error("source unavailable: failed to parse rows: {0}")]
    Parse(#[from] PolarsError),
    #[error("source unavailable: request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("source unavailable: server returned HTTP {0}")]
    Status(u16),
    #[error("source unavailable: invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source unavailable: malformed payload: {0}")]
    Payload(String),
    #[error("no data available for the requested parameters")]
    NoData,
}

/// Column holding the 4-digit observation year.
pub const YEAR_COL: &str = "Year";

/// Column holding the indicator (deaths per 1,000 live births).
pub const RATE_COL: &str = "Mortality Rate";
