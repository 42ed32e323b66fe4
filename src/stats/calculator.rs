//! Statistics Calculator Module
//! Grouped yearly means and pairwise Pearson correlation.

use polars::prelude::*;
use thiserror::Error;

use crate::data::YEAR_COL;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("no numeric columns for correlation")]
    NotEnoughNumericColumns,
}

/// Mean of the indicator for one year of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyMean {
    pub year: i64,
    pub mean: f64,
}

/// Pairwise Pearson coefficients across the numeric columns of a frame.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// Handles the aggregation behind both report artifacts.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean of `value_col` grouped by year, sorted ascending by year.
    /// Duplicate years are averaged.
    pub fn yearly_mean(df: &DataFrame, value_col: &str) -> Result<Vec<YearlyMean>, StatsError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(YEAR_COL)])
            .agg([col(value_col).mean().alias("mean")])
            .sort([YEAR_COL], Default::default())
            .collect()?;

        let years = grouped.column(YEAR_COL)?.cast(&DataType::Int64)?;
        let years = years.i64()?;
        let means = grouped.column("mean")?.f64()?;

        let series = years
            .into_iter()
            .zip(means)
            .filter_map(|(year, mean)| Some(YearlyMean { year: year?, mean: mean? }))
            .collect();
        Ok(series)
    }

    /// Names of columns with a numeric dtype.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Extract one column as `f64` values, dropping nulls.
    fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, StatsError> {
        let cast = df.column(name)?.cast(&DataType::Float64)?;
        let ca = cast.f64()?;
        Ok(ca.into_iter().flatten().collect())
    }

    /// Pearson correlation coefficient of two equally long samples.
    ///
    /// NaN when fewer than two paired observations exist or either sample has
    /// zero variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n < 2 {
            return f64::NAN;
        }

        let mean_x = x[..n].iter().sum::<f64>() / n as f64;
        let mean_y = y[..n].iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for i in 0..n {
            let dx = x[i] - mean_x;
            let dy = y[i] - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denom = (var_x * var_y).sqrt();
        if denom == 0.0 {
            return f64::NAN;
        }
        cov / denom
    }

    /// Pairwise Pearson matrix across all numeric columns.
    pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix, StatsError> {
        let columns = Self::numeric_columns(df);
        if columns.len() < 2 {
            return Err(StatsError::NotEnoughNumericColumns);
        }

        let samples: Vec<Vec<f64>> = columns
            .iter()
            .map(|name| Self::column_values(df, name))
            .collect::<Result<_, _>>()?;

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = Self::pearson(&samples[i], &samples[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix { columns, values })
    }
}
