//! Data Processor Module
//! Handles cleaning and the five-year window filter.

use polars::prelude::*;
use thiserror::Error;

use super::YEAR_COL;

/// First year of the analysis window (inclusive).
pub const WINDOW_START: i64 = 2019;

/// Last year of the analysis window (inclusive).
pub const WINDOW_END: i64 = 2023;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("year column is not numeric")]
    YearNotNumeric,
}

/// Handles dataset cleaning and window-filter operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop every record with a missing field in any column.
    pub fn drop_incomplete(df: &DataFrame) -> Result<DataFrame, FilterError> {
        Ok(df.clone().lazy().drop_nulls(None).collect()?)
    }

    /// Coerce the `Year` column to integer.
    ///
    /// Fails the whole operation when any year is non-numeric.
    pub fn coerce_year(df: &DataFrame) -> Result<DataFrame, FilterError> {
        // A missing column is a frame error, not a cast failure
        df.column(YEAR_COL)?;
        df.clone()
            .lazy()
            .with_column(col(YEAR_COL).strict_cast(DataType::Int64))
            .collect()
            .map_err(|_| FilterError::YearNotNumeric)
    }

    /// Retain only records with `Year` inside the inclusive window.
    pub fn filter_window(df: &DataFrame) -> Result<DataFrame, FilterError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(YEAR_COL)
                    .gt_eq(lit(WINDOW_START))
                    .and(col(YEAR_COL).lt_eq(lit(WINDOW_END))),
            )
            .collect()?;
        Ok(filtered)
    }

    /// Full cleaning stage: drop incomplete rows, coerce the year, apply the
    /// window. Idempotent on already-filtered data.
    pub fn clean_and_filter(df: &DataFrame) -> Result<DataFrame, FilterError> {
        let complete = Self::drop_incomplete(df)?;
        let typed = Self::coerce_year(&complete)?;
        Self::filter_window(&typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RATE_COL;

    fn frame(years: Vec<Option<i64>>, rates: Vec<Option<f64>>) -> DataFrame {
        DataFrame::new(vec![
            Column::new(YEAR_COL.into(), years),
            Column::new(RATE_COL.into(), rates),
        ])
        .unwrap()
    }

    fn years_of(df: &DataFrame) -> Vec<i64> {
        df.column(YEAR_COL)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn out_of_window_rows_are_excluded() {
        let df = frame(
            vec![Some(2018), Some(2020), Some(2023)],
            vec![Some(50.0), Some(45.0), Some(40.0)],
        );
        let filtered = DataProcessor::clean_and_filter(&df).unwrap();
        assert_eq!(years_of(&filtered), vec![2020, 2023]);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let df = frame(
            vec![Some(2018), Some(2019), Some(2023), Some(2024)],
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        );
        let filtered = DataProcessor::clean_and_filter(&df).unwrap();
        assert_eq!(years_of(&filtered), vec![2019, 2023]);
    }

    #[test]
    fn rows_with_missing_fields_never_survive() {
        let df = frame(
            vec![Some(2020), None, Some(2021), Some(2022)],
            vec![Some(45.0), Some(44.0), None, Some(43.0)],
        );
        let filtered = DataProcessor::clean_and_filter(&df).unwrap();
        assert_eq!(years_of(&filtered), vec![2020, 2022]);
        let nulls: usize = filtered.get_columns().iter().map(|c| c.null_count()).sum();
        assert_eq!(nulls, 0);
    }

    #[test]
    fn filter_is_idempotent() {
        let df = frame(
            vec![Some(2018), Some(2020), None, Some(2022)],
            vec![Some(50.0), Some(45.0), Some(44.0), Some(43.0)],
        );
        let once = DataProcessor::clean_and_filter(&df).unwrap();
        let twice = DataProcessor::clean_and_filter(&once).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn string_years_are_coerced_to_integers() {
        let df = DataFrame::new(vec![
            Column::new(YEAR_COL.into(), vec!["2019", "2024"]),
            Column::new(RATE_COL.into(), vec![41.5, 38.0]),
        ])
        .unwrap();
        let filtered = DataProcessor::clean_and_filter(&df).unwrap();
        assert_eq!(years_of(&filtered), vec![2019]);
    }

    #[test]
    fn non_numeric_year_fails_the_stage() {
        let df = DataFrame::new(vec![
            Column::new(YEAR_COL.into(), vec!["2020", "unknown"]),
            Column::new(RATE_COL.into(), vec![45.0, 44.0]),
        ])
        .unwrap();
        assert!(matches!(
            DataProcessor::clean_and_filter(&df),
            Err(FilterError::YearNotNumeric)
        ));
    }

    #[test]
    fn empty_frame_filters_to_empty() {
        let df = frame(vec![], vec![]);
        let filtered = DataProcessor::clean_and_filter(&df).unwrap();
        assert_eq!(filtered.height(), 0);
    }
}
