//! Interactive dashboard session.
//!
//! Prompts for a metric, a range, and a visualization mode with
//! `dialoguer`, then recomputes and prints the view. Repeats until the
//! user quits.

use dialoguer::{Input, Select};
use safety_map_analytics::{dataset_summary, detail_rows, render, slider_bounds};
use safety_map_analytics_models::{DashboardQuery, FilterRange, VizMode};
use safety_map_crime_models::Metric;
use safety_map_dataset::Dataset;
use safety_map_dataset::export::DEFAULT_EXPORT_FILENAME;

use crate::{export, format_dashboard, format_metrics, format_summary, format_table};

/// Top-level actions in the interactive menu.
enum DashboardAction {
    View,
    Stats,
    Table,
    Export,
    Metrics,
    Quit,
}

impl DashboardAction {
    const ALL: &[Self] = &[
        Self::View,
        Self::Stats,
        Self::Table,
        Self::Export,
        Self::Metrics,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::View => "Explore a metric",
            Self::Stats => "Show statistics",
            Self::Table => "Show detailed data",
            Self::Export => "Download data as CSV",
            Self::Metrics => "List metrics",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive dashboard over `dataset`.
///
/// # Errors
///
/// Returns an error if a prompt fails or the export cannot be written.
pub fn run(dataset: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = DashboardAction::ALL
        .iter()
        .map(DashboardAction::label)
        .collect();

    println!("India Safety Map");
    println!(
        "Data source: {} | Last updated: {}",
        dataset.source().name,
        dataset.source().last_updated_label()
    );

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match DashboardAction::ALL[idx] {
            DashboardAction::View => {
                let query = prompt_query(dataset)?;
                println!();
                println!("{}", format_dashboard(&render(dataset, &query)?));
            }
            DashboardAction::Stats => {
                let metric = prompt_metric()?;
                println!();
                println!("{}", format_summary(&dataset_summary(dataset, metric)?));
            }
            DashboardAction::Table => {
                println!();
                println!("{}", format_table(&detail_rows(dataset)));
            }
            DashboardAction::Export => {
                let path: String = Input::new()
                    .with_prompt("Output file")
                    .default(DEFAULT_EXPORT_FILENAME.to_string())
                    .interact_text()?;
                export(dataset, Some(&path))?;
                println!("Saved {path}");
            }
            DashboardAction::Metrics => {
                println!();
                println!("{}", format_metrics(dataset));
            }
            DashboardAction::Quit => return Ok(()),
        }
    }
}

fn prompt_metric() -> Result<Metric, dialoguer::Error> {
    let labels: Vec<&str> = Metric::all().iter().map(|m| m.title()).collect();

    let idx = Select::new()
        .with_prompt("Crime category")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Metric::all()[idx])
}

fn prompt_query(dataset: &Dataset) -> Result<DashboardQuery, dialoguer::Error> {
    let metric = prompt_metric()?;
    let bounds = slider_bounds(dataset, metric);

    let low: f64 = Input::new()
        .with_prompt(format!("{} from", metric.policy().axis_label))
        .default(bounds.low)
        .interact_text()?;
    let high: f64 = Input::new()
        .with_prompt(format!("{} to", metric.policy().axis_label))
        .default(bounds.high)
        .interact_text()?;

    let mode_labels: Vec<&str> = VizMode::all().iter().map(|m| m.label()).collect();
    let mode_idx = Select::new()
        .with_prompt("Visualization")
        .items(&mode_labels)
        .default(0)
        .interact()?;

    Ok(DashboardQuery {
        metric,
        range: Some(FilterRange::new(low, high)),
        mode: VizMode::all()[mode_idx],
    })
}
