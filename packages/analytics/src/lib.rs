#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard engine for the safety map.
//!
//! Every interaction runs the same pipeline over a borrowed [`Dataset`]:
//! [`filter::filter_regions`] keeps the regions whose metric value lies in
//! the selected range, then [`view::select_view`] turns that subset into a
//! spatial or ranked view with full-dataset summary statistics. [`render`]
//! wires the two together and adds the results table.

pub mod filter;
pub mod stats;
pub mod view;

use safety_map_analytics_models::{
    DashboardQuery, DashboardView, DetailRow, FilterRange, UnknownModeError, VizMode,
};
use safety_map_crime_models::{Metric, UnknownMetricError};
use safety_map_dataset::Dataset;
use thiserror::Error;

pub use filter::filter_regions;
pub use stats::{dataset_summary, slider_bounds, summarize};
pub use view::select_view;

/// Errors that can occur while answering a dashboard query.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Statistics were requested over zero regions.
    #[error("Cannot summarize an empty dataset")]
    EmptyDataset,

    /// The metric name is not one of the known metrics.
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetricError),

    /// The mode name is not `spatial` or `ranked`.
    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),
}

/// Builds a query from user-supplied names.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownMetric`] or
/// [`AnalyticsError::UnknownMode`] if a name is not recognized.
pub fn parse_query(
    metric: &str,
    mode: &str,
    range: Option<(f64, f64)>,
) -> Result<DashboardQuery, AnalyticsError> {
    Ok(DashboardQuery {
        metric: Metric::parse(metric)?,
        range: range.map(|(low, high)| FilterRange::new(low, high)),
        mode: VizMode::parse(mode)?,
    })
}

/// The results table: every region in canonical order, independent of any
/// filter.
#[must_use]
pub fn detail_rows(dataset: &Dataset) -> Vec<DetailRow> {
    dataset.records().iter().map(DetailRow::from).collect()
}

/// Recomputes the dashboard for one query.
///
/// A query without a range uses the metric's [`slider_bounds`].
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if the dataset has no regions.
pub fn render(dataset: &Dataset, query: &DashboardQuery) -> Result<DashboardView, AnalyticsError> {
    let range = query
        .range
        .unwrap_or_else(|| slider_bounds(dataset, query.metric));

    let subset = filter_regions(dataset, query.metric, range);
    log::debug!(
        "{} of {} regions have {} in {range}",
        subset.len(),
        dataset.len(),
        query.metric
    );

    let view = select_view(dataset, &subset, query.metric, query.mode)?;

    Ok(DashboardView {
        range,
        mode: query.mode,
        view,
        details: detail_rows(dataset),
        source: dataset.source().clone(),
    })
}
