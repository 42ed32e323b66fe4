//! Workbook Loader Module
//! Reads the mortality workbook (exported as CSV) into a DataFrame using Polars.

use std::path::Path;

use polars::prelude::*;
use tracing::info;

use super::LoaderError;

/// Load all rows of the workbook into a DataFrame.
///
/// The file is read with schema inference; a missing file or any row/column
/// parsing failure surfaces as [`LoaderError`].
pub fn load_workbook(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    if df.height() == 0 {
        return Err(LoaderError::NoData);
    }

    info!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "Workbook loaded"
    );
    Ok(df)
}
