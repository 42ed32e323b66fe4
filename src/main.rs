//! CLI entry point for the mortality-trends tool.
//!
//! One subcommand per data source; both run the same
//! load -> filter -> report pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mortality_trends::data::WORLD_BANK_URL;
use mortality_trends::pipeline::{self, ChartPaths};

#[derive(Parser)]
#[command(name = "mortality-trends")]
#[command(about = "Load child mortality statistics, filter to 2019-2023 and render charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a local workbook exported as CSV
    Workbook {
        /// Path to the workbook CSV
        #[arg(value_name = "PATH", default_value = "Under-five_Deaths_2023.csv")]
        path: PathBuf,

        /// Directory receiving the chart PNGs
        #[arg(long, default_value = ".")]
        chart_dir: PathBuf,
    },
    /// Fetch the indicator from the World Bank API
    Api {
        /// Indicator endpoint to query
        #[arg(long, default_value = WORLD_BANK_URL)]
        url: String,

        /// CSV file the fetched data is saved to
        #[arg(short, long, default_value = "child_mortality_data.csv")]
        output: PathBuf,

        /// Directory receiving the chart PNGs
        #[arg(long, default_value = ".")]
        chart_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let artifacts = match cli.command {
        Commands::Workbook { path, chart_dir } => {
            pipeline::run_workbook(&path, &ChartPaths::in_dir(&chart_dir))?
        }
        Commands::Api {
            url,
            output,
            chart_dir,
        } => pipeline::run_api(&url, &output, &ChartPaths::in_dir(&chart_dir))?,
    };

    println!("Trend chart: {}", artifacts.trend.display());
    if let Some(heatmap) = &artifacts.heatmap {
        println!("Correlation heatmap: {}", heatmap.display());
    }

    Ok(())
}
