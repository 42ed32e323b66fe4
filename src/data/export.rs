//! CSV export for the fetched Dataset.
//!
//! The API pipeline persists the raw extracted data as a side effect; the
//! typed reader exists so a written file can be checked against the frame
//! that produced it.

use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{RATE_COL, YEAR_COL};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One exported row, header `Year,Mortality Rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRow {
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Mortality Rate")]
    pub rate: f64,
}

/// Write the `Year` / `Mortality Rate` columns of a frame to a CSV file,
/// replacing any existing file.
pub fn write_frame(path: &Path, df: &DataFrame) -> Result<(), ExportError> {
    let rows = rows_from_frame(df)?;
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV export");

    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reload an exported file into typed rows.
pub fn read_rows(path: &Path) -> Result<Vec<MortalityRow>, ExportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

fn rows_from_frame(df: &DataFrame) -> Result<Vec<MortalityRow>, ExportError> {
    let years = df.column(YEAR_COL)?.cast(&DataType::Int64)?;
    let years = years.i64()?;
    let rates = df.column(RATE_COL)?.cast(&DataType::Float64)?;
    let rates = rates.f64()?;

    let rows = years
        .into_iter()
        .zip(rates)
        .filter_map(|(year, rate)| Some(MortalityRow { year: year?, rate: rate? }))
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(YEAR_COL.into(), vec![2023i64, 2022, 2021]),
            Column::new(RATE_COL.into(), vec![38.2, 39.6, 41.0]),
        ])
        .unwrap()
    }

    #[test]
    fn written_file_reloads_to_the_same_pairs() {
        let path = temp_path("mortality_trends_test_roundtrip.csv");
        let _ = fs::remove_file(&path);

        let df = sample_frame();
        write_frame(&path, &df).unwrap();
        let rows = read_rows(&path).unwrap();

        assert_eq!(
            rows,
            vec![
                MortalityRow { year: 2023, rate: 38.2 },
                MortalityRow { year: 2022, rate: 39.6 },
                MortalityRow { year: 2021, rate: 41.0 },
            ]
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn export_writes_header_once() {
        let path = temp_path("mortality_trends_test_header.csv");
        let _ = fs::remove_file(&path);

        write_frame(&path, &sample_frame()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Year,Mortality Rate"));
        assert_eq!(lines.clone().count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rewrite_replaces_previous_content() {
        let path = temp_path("mortality_trends_test_rewrite.csv");
        let _ = fs::remove_file(&path);

        write_frame(&path, &sample_frame()).unwrap();
        write_frame(&path, &sample_frame()).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 3);

        fs::remove_file(&path).unwrap();
    }
}
