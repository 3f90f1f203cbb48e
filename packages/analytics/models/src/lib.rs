#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query, view, and summary statistic types for the dashboard.
//!
//! These are the shapes handed to a presentation layer: a renderable view
//! (map points or ranked bars with their encodings), summary statistics
//! over the full dataset, and the detail table. All of them serialize to
//! `camelCase` JSON.

use safety_map_crime_models::{ColorScale, Metric, SortDirection};
use safety_map_dataset_models::{DataSourceInfo, RegionRecord};
use safety_map_geography_models::{Coordinates, MapViewport};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A closed numeric interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

impl FilterRange {
    /// Creates a range. `low > high` is allowed and matches nothing.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `low <= value <= high`.
    #[must_use]
    pub const fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Whether the range can match anything at all.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.low <= self.high
    }
}

impl std::fmt::Display for FilterRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// How the filtered regions are visualized.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VizMode {
    /// Points placed by coordinates, colored by value and sized by
    /// population.
    #[default]
    Spatial,
    /// Labeled bars ordered by value.
    Ranked,
}

impl VizMode {
    /// Parses a mode from its name (`spatial` or `ranked`).
    ///
    /// # Errors
    ///
    /// Returns [`UnknownModeError`] for any other name.
    pub fn parse(name: &str) -> Result<Self, UnknownModeError> {
        name.parse().map_err(|_| UnknownModeError {
            name: name.to_string(),
        })
    }

    /// Returns both modes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Spatial, Self::Ranked]
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spatial => "Bubble Map",
            Self::Ranked => "Bar Chart",
        }
    }
}

/// Error returned when a visualization mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError {
    /// The name that failed to parse.
    pub name: String,
}

impl std::fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown visualization mode '{}': expected spatial or ranked",
            self.name
        )
    }
}

impl std::error::Error for UnknownModeError {}

/// A user selection driving one recompute of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// Selected metric.
    pub metric: Metric,
    /// Selected range. `None` means the metric's full slider range.
    pub range: Option<FilterRange>,
    /// Selected visualization mode.
    pub mode: VizMode,
}

/// One point of the spatial view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Region name (hover label).
    pub region: String,
    /// Where to draw the point.
    pub coordinates: Coordinates,
    /// Value mapped through the color scale.
    pub color_value: f64,
    /// Marker size, scaled from population.
    pub size: f64,
    /// Population in millions (hover data).
    pub population: f64,
}

/// One bar of the ranked view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedBar {
    /// Region name (axis label).
    pub region: String,
    /// Bar height, also mapped through the color scale.
    pub value: f64,
    /// Population in millions (hover data).
    pub population: f64,
}

/// The drawable part of a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "mode",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum RenderableView {
    /// Spatial view.
    Spatial {
        /// Points in canonical region order.
        points: Vec<MapPoint>,
        /// Camera settings.
        viewport: MapViewport,
    },
    /// Ranked view.
    Ranked {
        /// Bars in display order.
        bars: Vec<RankedBar>,
        /// Order the bars were sorted in.
        sort_direction: SortDirection,
    },
}

impl RenderableView {
    /// Number of points or bars.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Spatial { points, .. } => points.len(),
            Self::Ranked { bars, .. } => bars.len(),
        }
    }

    /// Whether nothing would be drawn.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Region names in drawing order.
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        match self {
            Self::Spatial { points, .. } => points.iter().map(|p| p.region.as_str()).collect(),
            Self::Ranked { bars, .. } => bars.iter().map(|b| b.region.as_str()).collect(),
        }
    }
}

/// A region at one extreme of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeRegion {
    /// Region name.
    pub region: String,
    /// The region's value.
    pub value: f64,
}

/// A labeled extreme ready for display, e.g. "Safest State".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Display label.
    pub label: String,
    /// Region name.
    pub region: String,
    /// The region's value.
    pub value: f64,
}

/// Statistics of one metric over the full, unfiltered dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Metric the statistics describe.
    pub metric: Metric,
    /// Mean over every region.
    pub mean: f64,
    /// Region with the smallest value (first in canonical order on ties).
    pub min: ExtremeRegion,
    /// Region with the largest value (first in canonical order on ties).
    pub max: ExtremeRegion,
}

impl SummaryStats {
    /// The two extremes labeled for display, safe end first.
    ///
    /// For the composite score that is the maximum ("Safest State") then
    /// the minimum ("Most Vulnerable State"); for raw rates the minimum
    /// ("Lowest Rate") then the maximum ("Highest Rate").
    #[must_use]
    pub fn highlights(&self) -> [Highlight; 2] {
        let policy = self.metric.policy();
        let (safer, riskier) = if policy.higher_is_safer {
            (&self.max, &self.min)
        } else {
            (&self.min, &self.max)
        };

        [
            Highlight {
                label: policy.safer_label.to_string(),
                region: safer.region.clone(),
                value: safer.value,
            },
            Highlight {
                label: policy.riskier_label.to_string(),
                region: riskier.region.clone(),
                value: riskier.value,
            },
        ]
    }
}

/// The view of one metric: what to draw plus its labels and statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricView {
    /// Selected metric.
    pub metric: Metric,
    /// Page heading, e.g. "India Safety Map: Theft".
    pub heading: String,
    /// Chart title, e.g. "Theft by State".
    pub title: String,
    /// Value axis / legend label.
    pub axis_label: String,
    /// Explanatory note for the metric.
    pub description: String,
    /// Color scale for the value encoding.
    pub color_scale: ColorScale,
    /// What to draw.
    pub view: RenderableView,
    /// Full-dataset statistics.
    pub summary: SummaryStats,
}

/// One row of the detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    /// Region name.
    pub state: String,
    /// Theft rate.
    pub theft: f64,
    /// Burglary rate.
    pub burglary: f64,
    /// Assault rate.
    pub assault: f64,
    /// Sexual violence rate.
    pub sexual_violence: f64,
    /// Other threats rate.
    pub other_threats: f64,
    /// Composite safety score.
    pub overall_safety_score: f64,
    /// Population in millions.
    pub population: f64,
}

impl From<&RegionRecord> for DetailRow {
    fn from(record: &RegionRecord) -> Self {
        Self {
            state: record.name.clone(),
            theft: record.theft,
            burglary: record.burglary,
            assault: record.assault,
            sexual_violence: record.sexual_violence,
            other_threats: record.other_threats,
            overall_safety_score: record.overall_safety_score,
            population: record.population,
        }
    }
}

/// Everything a presentation layer needs for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Range that was applied.
    pub range: FilterRange,
    /// Mode that was rendered.
    pub mode: VizMode,
    /// The rendered metric view.
    pub view: MetricView,
    /// Every region, canonical order, regardless of the filter.
    pub details: Vec<DetailRow>,
    /// Data provenance.
    pub source: DataSourceInfo,
}
