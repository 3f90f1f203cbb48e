#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Safety map dashboard for the terminal.
//!
//! ```text
//! safety_map view --metric theft [--min 0] [--max 30] [--mode ranked] [--json]
//! safety_map stats --metric overall_safety_score [--json]
//! safety_map table [--json]
//! safety_map export [--output india_crime_data_ncrb.csv | -]
//! safety_map import --input india_crime_data_ncrb.csv [--json]
//! safety_map metrics
//! ```
//!
//! Running `safety_map` with no subcommand enters interactive mode.

use clap::{Parser, Subcommand};
use safety_map_analytics::{dataset_summary, detail_rows, parse_query, render, slider_bounds};
use safety_map_cli::{
    export, format_dashboard, format_metrics, format_summary, format_table, import,
};
use safety_map_crime_models::Metric;
use safety_map_dataset::Dataset;

#[derive(Parser)]
#[command(
    name = "safety_map",
    about = "Explore crime rates and safety scores across Indian states"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter regions on a metric and render the view
    View {
        /// Metric name (e.g. `overall_safety_score`, `theft`)
        #[arg(long, default_value = "overall_safety_score")]
        metric: String,
        /// Lower bound of the range (defaults to the slider minimum)
        #[arg(long)]
        min: Option<f64>,
        /// Upper bound of the range (defaults to the slider maximum)
        #[arg(long)]
        max: Option<f64>,
        /// Visualization mode: `spatial` or `ranked`
        #[arg(long, default_value = "spatial")]
        mode: String,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show summary statistics for a metric over every region
    Stats {
        /// Metric name
        #[arg(long, default_value = "overall_safety_score")]
        metric: String,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the detailed data table
    Table {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the full dataset as CSV
    Export {
        /// Output path, or `-` for stdout
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Read a CSV export back and show it as the detailed data table
    Import {
        /// Input path, or `-` for stdin
        #[arg(long, short)]
        input: String,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available metrics
    Metrics,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let dataset = Dataset::shipped()?;
    log::debug!("Loaded {} regions", dataset.len());

    let Some(command) = cli.command else {
        return safety_map_cli::interactive::run(&dataset);
    };

    match command {
        Commands::View {
            metric,
            min,
            max,
            mode,
            json,
        } => {
            let range = match (min, max) {
                (None, None) => None,
                (min, max) => {
                    let bounds = slider_bounds(&dataset, Metric::parse(&metric)?);
                    Some((min.unwrap_or(bounds.low), max.unwrap_or(bounds.high)))
                }
            };
            let query = parse_query(&metric, &mode, range)?;
            let dashboard = render(&dataset, &query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!("{}", format_dashboard(&dashboard));
            }
        }
        Commands::Stats { metric, json } => {
            let summary = dataset_summary(&dataset, Metric::parse(&metric)?)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", format_summary(&summary));
            }
        }
        Commands::Table { json } => {
            let rows = detail_rows(&dataset);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", format_table(&rows));
                println!("\n{} state(s)", rows.len());
            }
        }
        Commands::Export { output } => export(&dataset, output.as_deref())?,
        Commands::Import { input, json } => {
            let rows = import(&dataset, &input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", format_table(&rows));
                println!("\n{} state(s)", rows.len());
            }
        }
        Commands::Metrics => println!("{}", format_metrics(&dataset)),
    }

    Ok(())
}
