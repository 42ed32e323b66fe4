//! Statistics module - yearly aggregation and correlation

mod calculator;

pub use calculator::{CorrelationMatrix, StatsCalculator, StatsError, YearlyMean};
