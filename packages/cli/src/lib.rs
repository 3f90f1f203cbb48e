#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for the safety map dashboard.
//!
//! Formats dashboard views, summary statistics, and the results table as
//! plain text, and writes the CSV export. The `safety_map` binary and the
//! [`interactive`] menu are thin wrappers over these helpers.

pub mod interactive;

use std::fs::File;
use std::path::Path;

use safety_map_analytics::slider_bounds;
use safety_map_analytics_models::{DashboardView, DetailRow, RenderableView, SummaryStats};
use safety_map_crime_models::Metric;
use safety_map_dataset::export::{DEFAULT_EXPORT_FILENAME, read_csv_for, write_csv, write_csv_file};
use safety_map_dataset::{Dataset, DatasetError};

/// Path meaning standard output for an export, standard input for an import.
pub const STDIO_TARGET: &str = "-";

/// Renders a dashboard view as text: heading, the plotted regions, summary
/// statistics, and the data source footer.
#[must_use]
pub fn format_dashboard(dashboard: &DashboardView) -> String {
    let view = &dashboard.view;
    let mut lines = vec![
        view.heading.clone(),
        format!(
            "{} ({}, range {}, color scale {})",
            view.title,
            dashboard.mode.label(),
            dashboard.range,
            view.color_scale
        ),
        format!("Note: {}", view.description),
        String::new(),
    ];

    if view.view.is_empty() {
        lines.push("No regions match the selected range.".to_string());
    } else {
        match &view.view {
            RenderableView::Spatial { points, viewport } => {
                lines.push(format!(
                    "{:<28} {:>9} {:>9} {:>10} {:>6}",
                    "REGION", "LAT", "LON", "VALUE", "SIZE"
                ));
                lines.push("-".repeat(66));
                for point in points {
                    lines.push(format!(
                        "{:<28} {:>9.4} {:>9.4} {:>10.2} {:>6.1}",
                        point.region,
                        point.coordinates.latitude,
                        point.coordinates.longitude,
                        point.color_value,
                        point.size
                    ));
                }
                if let Some(bounds) = &viewport.bounds {
                    lines.push(format!(
                        "Extent: {:.4}..{:.4} N, {:.4}..{:.4} E",
                        bounds.south, bounds.north, bounds.west, bounds.east
                    ));
                }
            }
            RenderableView::Ranked { bars, .. } => {
                lines.push(format!(
                    "{:>4} {:<28} {:>10} {:>12}",
                    "#", "REGION", "VALUE", "POP (M)"
                ));
                lines.push("-".repeat(57));
                for (rank, bar) in bars.iter().enumerate() {
                    lines.push(format!(
                        "{:>4} {:<28} {:>10.2} {:>12.1}",
                        rank + 1,
                        bar.region,
                        bar.value,
                        bar.population
                    ));
                }
            }
        }
        lines.push(format!("\n{} region(s) shown", view.view.len()));
    }

    lines.push(String::new());
    lines.push(format_summary(&view.summary));
    lines.push(String::new());
    lines.push(format!(
        "Data source: {} | Last updated: {}",
        dashboard.source.name,
        dashboard.source.last_updated_label()
    ));

    lines.join("\n")
}

/// Renders the full-dataset statistics of one metric.
#[must_use]
pub fn format_summary(summary: &SummaryStats) -> String {
    let mut lines = vec![format!(
        "National Average ({}): {:.2}",
        summary.metric.title(),
        summary.mean
    )];
    for highlight in summary.highlights() {
        lines.push(format!(
            "{}: {} ({:.1})",
            highlight.label, highlight.region, highlight.value
        ));
    }
    lines.join("\n")
}

/// Renders the results table: every region with every metric.
#[must_use]
pub fn format_table(rows: &[DetailRow]) -> String {
    let mut lines = vec![
        format!(
            "{:<28} {:>7} {:>9} {:>8} {:>9} {:>7} {:>7} {:>8}",
            "STATE", "THEFT", "BURGLARY", "ASSAULT", "SEXUAL V", "OTHER", "SCORE", "POP (M)"
        ),
        "-".repeat(90),
    ];
    for row in rows {
        lines.push(format!(
            "{:<28} {:>7.1} {:>9.1} {:>8.1} {:>9.1} {:>7.1} {:>7.1} {:>8.1}",
            row.state,
            row.theft,
            row.burglary,
            row.assault,
            row.sexual_violence,
            row.other_threats,
            row.overall_safety_score,
            row.population
        ));
    }
    lines.join("\n")
}

/// Lists every metric with its slider range and note.
#[must_use]
pub fn format_metrics(dataset: &Dataset) -> String {
    Metric::all()
        .iter()
        .map(|metric| {
            let name: &str = metric.as_ref();
            format!(
                "{:<22} {:<26} {}\n  {}",
                name,
                metric.title(),
                slider_bounds(dataset, *metric),
                metric.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the CSV export to `output`, or to standard output when `output`
/// is [`STDIO_TARGET`]. `None` writes [`DEFAULT_EXPORT_FILENAME`].
///
/// # Errors
///
/// Returns [`DatasetError`] if the export cannot be written.
pub fn export(dataset: &Dataset, output: Option<&str>) -> Result<(), DatasetError> {
    match output.unwrap_or(DEFAULT_EXPORT_FILENAME) {
        STDIO_TARGET => write_csv(dataset, std::io::stdout().lock()),
        path => write_csv_file(dataset, Path::new(path)),
    }
}

/// Reads a CSV export from `input` (or standard input for
/// [`STDIO_TARGET`]) and returns its rows as a results table. The export
/// must list the regions of `dataset` in canonical order.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened or the export is
/// malformed, incomplete, or out of order.
pub fn import(dataset: &Dataset, input: &str) -> Result<Vec<DetailRow>, DatasetError> {
    let records = match input {
        STDIO_TARGET => read_csv_for(dataset, std::io::stdin().lock())?,
        path => read_csv_for(dataset, File::open(path)?)?,
    };
    log::info!("Imported {} regions from {input}", records.len());
    Ok(records.iter().map(DetailRow::from).collect())
}
