//! Summary statistics and slider bounds over the full dataset.

use safety_map_analytics_models::{ExtremeRegion, FilterRange, SummaryStats};
use safety_map_crime_models::Metric;
use safety_map_dataset::Dataset;
use safety_map_dataset_models::RegionRecord;

use crate::AnalyticsError;

/// Fixed slider range of the composite score.
pub const SCORE_RANGE: FilterRange = FilterRange::new(0.0, 100.0);

/// Upper-bound headroom applied to raw-rate sliders.
pub const RATE_HEADROOM: f64 = 1.2;

/// Computes the mean, minimum, and maximum of `metric` over `records`.
///
/// Ties on an extreme go to the record that comes first.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if `records` is empty.
pub fn summarize(records: &[RegionRecord], metric: Metric) -> Result<SummaryStats, AnalyticsError> {
    let (first, rest) = records.split_first().ok_or(AnalyticsError::EmptyDataset)?;

    let mut min = first;
    let mut max = first;
    let mut total = first.value(metric);

    for record in rest {
        let value = record.value(metric);
        total += value;
        if value < min.value(metric) {
            min = record;
        }
        if value > max.value(metric) {
            max = record;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = total / records.len() as f64;

    Ok(SummaryStats {
        metric,
        mean,
        min: extreme(min, metric),
        max: extreme(max, metric),
    })
}

/// Statistics of `metric` over every region of the dataset.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if the dataset has no regions.
pub fn dataset_summary(dataset: &Dataset, metric: Metric) -> Result<SummaryStats, AnalyticsError> {
    summarize(dataset.records(), metric)
}

/// Default (widest) range offered for `metric`.
///
/// The composite score always spans `[0, 100]`. Raw rates span from zero
/// to the dataset maximum plus 20% headroom, truncated to a whole number.
#[must_use]
pub fn slider_bounds(dataset: &Dataset, metric: Metric) -> FilterRange {
    if metric.is_crime_rate() {
        FilterRange::new(0.0, (dataset.max(metric) * RATE_HEADROOM).floor())
    } else {
        SCORE_RANGE
    }
}

fn extreme(record: &RegionRecord, metric: Metric) -> ExtremeRegion {
    ExtremeRegion {
        region: record.name.clone(),
        value: record.value(metric),
    }
}
