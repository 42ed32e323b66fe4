//! mortality-trends - child mortality statistics pipelines
//!
//! Two linear pipelines over the same stages: load a Dataset (local workbook
//! or the World Bank indicator API), clean and filter it to the 2019-2023
//! window, then chart the yearly trend and the column correlations.

pub mod charts;
pub mod data;
pub mod pipeline;
pub mod stats;
