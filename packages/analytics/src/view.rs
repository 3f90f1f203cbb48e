//! View selection: turns a filtered subset into a renderable description.
//!
//! Metric-dependent choices (color scale, sort direction, labels) all come
//! from the metric's [`safety_map_crime_models::MetricPolicy`].

use geo::{BoundingRect, MultiPoint, Point};
use safety_map_analytics_models::{MapPoint, MetricView, RankedBar, RenderableView, VizMode};
use safety_map_crime_models::{Metric, SortDirection};
use safety_map_dataset::Dataset;
use safety_map_dataset_models::{DataSourceInfo, RegionRecord};
use safety_map_geography_models::{BoundingBox, MapViewport};

use crate::AnalyticsError;
use crate::stats::dataset_summary;

/// Marker size added on top of the population-scaled size.
pub const BUBBLE_FLOOR_SIZE: f64 = 5.0;

/// Marker size span between the smallest and the most populous region.
pub const BUBBLE_SCALE: f64 = 40.0;

/// Marker size for a region given the largest population in the subset.
#[must_use]
pub fn bubble_size(population: f64, max_population: f64) -> f64 {
    if max_population > 0.0 {
        (population / max_population).mul_add(BUBBLE_SCALE, BUBBLE_FLOOR_SIZE)
    } else {
        BUBBLE_FLOOR_SIZE
    }
}

/// One map point per region, in subset order.
#[must_use]
pub fn spatial_points(subset: &[&RegionRecord], metric: Metric) -> Vec<MapPoint> {
    let max_population = subset.iter().map(|r| r.population).fold(0.0_f64, f64::max);

    subset
        .iter()
        .map(|record| MapPoint {
            region: record.name.clone(),
            coordinates: record.coordinates,
            color_value: record.value(metric),
            size: bubble_size(record.population, max_population),
            population: record.population,
        })
        .collect()
}

/// One bar per region, sorted by the metric's policy. The sort is stable,
/// so equal values keep their subset order.
#[must_use]
pub fn ranked_bars(subset: &[&RegionRecord], metric: Metric) -> Vec<RankedBar> {
    let mut bars: Vec<RankedBar> = subset
        .iter()
        .map(|record| RankedBar {
            region: record.name.clone(),
            value: record.value(metric),
            population: record.population,
        })
        .collect();

    match metric.policy().sort_direction {
        SortDirection::Ascending => bars.sort_by(|a, b| a.value.total_cmp(&b.value)),
        SortDirection::Descending => bars.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }

    bars
}

/// Camera for the spatial view: the dataset's default center and scale,
/// plus the extent of the plotted points.
#[must_use]
pub fn viewport(source: &DataSourceInfo, points: &[MapPoint]) -> MapViewport {
    let multi: MultiPoint<f64> = points
        .iter()
        .map(|p| Point::new(p.coordinates.longitude, p.coordinates.latitude))
        .collect();

    let bounds = multi.bounding_rect().map(|rect| {
        let (min, max) = (rect.min(), rect.max());
        BoundingBox::new(min.x, min.y, max.x, max.y)
    });

    MapViewport {
        center: source.map_center,
        projection_scale: source.projection_scale,
        bounds,
    }
}

/// Builds the view of `metric` for a filtered subset.
///
/// Summary statistics are always computed over the full `dataset`, not the
/// subset, so they stay comparable as the filter changes.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] if the dataset has no regions.
pub fn select_view(
    dataset: &Dataset,
    subset: &[&RegionRecord],
    metric: Metric,
    mode: VizMode,
) -> Result<MetricView, AnalyticsError> {
    let policy = metric.policy();
    let summary = dataset_summary(dataset, metric)?;

    let view = match mode {
        VizMode::Spatial => {
            let points = spatial_points(subset, metric);
            let viewport = viewport(dataset.source(), &points);
            RenderableView::Spatial { points, viewport }
        }
        VizMode::Ranked => RenderableView::Ranked {
            bars: ranked_bars(subset, metric),
            sort_direction: policy.sort_direction,
        },
    };

    log::debug!(
        "Selected {mode} view of {metric} with {} of {} regions",
        view.len(),
        dataset.len()
    );

    Ok(MetricView {
        metric,
        heading: format!("India Safety Map: {}", metric.title()),
        title: format!("{} by State", metric.title()),
        axis_label: policy.axis_label.to_string(),
        description: metric.description(),
        color_scale: policy.color_scale,
        view,
        summary,
    })
}
