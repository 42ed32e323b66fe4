//! World Bank API Loader Module
//! Fetches the child-mortality indicator as JSON and extracts it into a
//! two-column DataFrame.

use std::time::Duration;

use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{LoaderError, RATE_COL, YEAR_COL};

/// Under-five mortality rate for Kenya (deaths per 1,000 live births).
pub const WORLD_BANK_URL: &str = "https://api.worldbank.org/v2/country/KE/indicator/SH.DYN.MORT";

/// Client-side timeout for the single GET request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One `{date, value}` observation from the indicator payload.
///
/// `value` is null for years the indicator has no estimate; those entries are
/// dropped during extraction, before the Dataset exists.
#[derive(Debug, Deserialize)]
struct IndicatorEntry {
    date: String,
    value: Option<f64>,
}

/// Fetch the indicator endpoint and extract a `Year` / `Mortality Rate` frame.
///
/// Issues one blocking GET with `format=json` and a fixed 10-second timeout.
/// Any non-2xx status, network failure or unexpected payload shape is a
/// [`LoaderError`].
pub fn fetch_indicator(url: &str) -> Result<DataFrame, LoaderError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client.get(url).query(&[("format", "json")]).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoaderError::Status(status.as_u16()));
    }

    let body = response.bytes()?;
    debug!(bytes = body.len(), url, "Indicator payload received");

    let entries = parse_payload(&body)?;
    let df = frame_from_entries(&entries)?;

    info!(rows = df.height(), url, "Indicator data fetched");
    Ok(df)
}

/// Pull the observation list out of the API payload.
///
/// The endpoint answers with a two-element array `[metadata, observations]`;
/// error responses carry a single-element array instead.
fn parse_payload(body: &[u8]) -> Result<Vec<IndicatorEntry>, LoaderError> {
    let value: Value = serde_json::from_slice(body)?;

    let top = value
        .as_array()
        .ok_or_else(|| LoaderError::Payload("expected a top-level JSON array".into()))?;

    let observations = match top.get(1) {
        Some(v) if !v.is_null() => v,
        _ => return Err(LoaderError::NoData),
    };
    if !observations.is_array() {
        return Err(LoaderError::Payload(
            "second payload element is not an array".into(),
        ));
    }

    Ok(serde_json::from_value(observations.clone())?)
}

/// Build the Dataset, skipping entries with a null value.
fn frame_from_entries(entries: &[IndicatorEntry]) -> Result<DataFrame, LoaderError> {
    let mut years: Vec<i64> = Vec::new();
    let mut rates: Vec<f64> = Vec::new();

    for entry in entries {
        let Some(rate) = entry.value else { continue };
        let year: i64 = entry
            .date
            .parse()
            .map_err(|_| LoaderError::Payload(format!("non-numeric date {:?}", entry.date)))?;
        years.push(year);
        rates.push(rate);
    }

    if years.is_empty() {
        return Err(LoaderError::NoData);
    }

    let df = DataFrame::new(vec![
        Column::new(YEAR_COL.into(), years),
        Column::new(RATE_COL.into(), rates),
    ])?;

    Ok(df)
}
