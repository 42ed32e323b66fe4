//! Pipeline drivers: Loader -> Cleaner/Filter -> Reporter.
//!
//! Each stage returns a typed result and the driver short-circuits on the
//! first failure instead of carrying partial state forward.

use std::path::{Path, PathBuf};

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::info;

use crate::charts;
use crate::data::{self, DataProcessor, RATE_COL, WINDOW_END, WINDOW_START};
use crate::stats::StatsCalculator;

const TREND_CHART_FILE: &str = "mortality_trends.png";
const HEATMAP_FILE: &str = "correlation_matrix.png";

const PREVIEW_ROWS: usize = 5;

/// Destination files for the two report artifacts.
#[derive(Debug, Clone)]
pub struct ChartPaths {
    pub trend: PathBuf,
    pub heatmap: PathBuf,
}

impl ChartPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            trend: dir.join(TREND_CHART_FILE),
            heatmap: dir.join(HEATMAP_FILE),
        }
    }
}

/// What the reporter produced. `heatmap` is `None` when the dataset did not
/// have enough columns for a correlation matrix.
#[derive(Debug)]
pub struct ReportArtifacts {
    pub trend: PathBuf,
    pub heatmap: Option<PathBuf>,
}

/// Spreadsheet pipeline: local workbook -> filter -> charts.
pub fn run_workbook(input: &Path, charts: &ChartPaths) -> Result<ReportArtifacts> {
    let raw = data::load_workbook(input)?;
    println!("Loaded Data:");
    println!("{}", raw.head(Some(PREVIEW_ROWS)));

    let filtered = filter_stage(&raw)?;

    report(
        &filtered,
        "Child Mortality Rates (2019-2023)",
        "Correlation Matrix (2019-2023)",
        charts,
    )
}

/// API pipeline: World Bank indicator -> CSV side effect -> filter -> charts.
pub fn run_api(url: &str, csv_out: &Path, charts: &ChartPaths) -> Result<ReportArtifacts> {
    let raw = data::fetch_indicator(url)?;
    data::write_frame(csv_out, &raw)?;
    info!(path = %csv_out.display(), "Data fetched and saved");
    println!("Loaded Data:");
    println!("{}", raw.head(Some(PREVIEW_ROWS)));

    let filtered = filter_stage(&raw)?;

    report(
        &filtered,
        "Yearly Trends in Child Mortality Rates in Kenya",
        "Correlation Matrix",
        charts,
    )
}

fn filter_stage(raw: &DataFrame) -> Result<DataFrame> {
    let filtered = DataProcessor::clean_and_filter(raw)?;
    info!(
        rows = filtered.height(),
        "Dataset filtered to {WINDOW_START}-{WINDOW_END}"
    );
    println!("Filtered Data ({WINDOW_START}-{WINDOW_END}):");
    println!("{}", filtered.head(Some(PREVIEW_ROWS)));
    Ok(filtered)
}

/// A correlation heatmap needs more than the Year and indicator columns.
pub fn should_render_heatmap(df: &DataFrame) -> bool {
    df.width() > 2
}

fn report(
    df: &DataFrame,
    trend_title: &str,
    heatmap_title: &str,
    paths: &ChartPaths,
) -> Result<ReportArtifacts> {
    let series = StatsCalculator::yearly_mean(df, RATE_COL)?;
    charts::render_trend_chart(&series, trend_title, &paths.trend)?;
    info!(path = %paths.trend.display(), "Trend chart written");

    let heatmap = if should_render_heatmap(df) {
        let matrix = StatsCalculator::correlation_matrix(df)?;
        charts::render_correlation_heatmap(&matrix, heatmap_title, &paths.heatmap)?;
        info!(path = %paths.heatmap.display(), "Correlation heatmap written");
        Some(paths.heatmap.clone())
    } else {
        info!("Not enough numerical columns for a correlation heatmap.");
        None
    };

    Ok(ReportArtifacts {
        trend: paths.trend.clone(),
        heatmap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn two_column_dataset_skips_the_heatmap() {
        let df = DataFrame::new(vec![
            Column::new("Year".into(), vec![2020i64, 2021]),
            Column::new("Mortality Rate".into(), vec![45.0, 44.0]),
        ])
        .unwrap();
        assert!(!should_render_heatmap(&df));
    }

    #[test]
    fn wider_dataset_gets_a_heatmap() {
        let df = DataFrame::new(vec![
            Column::new("Year".into(), vec![2020i64, 2021]),
            Column::new("Mortality Rate".into(), vec![45.0, 44.0]),
            Column::new("Births".into(), vec![1.0, 1.1]),
        ])
        .unwrap();
        assert!(should_render_heatmap(&df));
    }
}
