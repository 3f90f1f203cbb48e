#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The immutable safety map dataset.
//!
//! A [`Dataset`] is built once from reference data by [`DatasetBuilder`],
//! owned by the application root, and lent by shared reference to the
//! filter and view code. There is no mutation API: every field of every
//! record is fixed after [`DatasetBuilder::build`] returns.

pub mod builder;
pub mod export;
pub mod reference;

use safety_map_crime_models::{Metric, SeverityWeights};
use safety_map_dataset_models::{DataSourceInfo, RegionRecord};

pub use builder::{CategoryMaxima, DatasetBuilder};
pub use reference::ReferenceData;

/// Errors that can occur while building, exporting, or importing the
/// dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The reference TOML document could not be parsed.
    #[error("Reference data parse error: {0}")]
    Reference(#[from] toml::de::Error),

    /// The canonical region list is empty.
    #[error("Reference data lists no regions")]
    EmptyRegionList,

    /// A region name appears more than once in the canonical list.
    #[error("Duplicate region '{region}' in region list")]
    DuplicateRegion {
        /// The repeated region name.
        region: String,
    },

    /// A region in the canonical list has no entry in one of the mappings.
    #[error("Missing {field} value for region '{region}'")]
    MissingValue {
        /// Region without a value.
        region: String,
        /// Mapping the region is missing from.
        field: String,
    },

    /// A reference value is non-finite or out of range.
    #[error("Invalid {field} value {value} for region '{region}'")]
    InvalidValue {
        /// Region the value belongs to.
        region: String,
        /// Field the value belongs to.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A region's coordinates are outside valid latitude/longitude ranges.
    #[error("Invalid coordinates for region '{region}'")]
    InvalidCoordinates {
        /// Region with bad coordinates.
        region: String,
    },

    /// Reading or writing CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An export file does not have the expected shape.
    #[error("Invalid export: {message}")]
    InvalidExport {
        /// Description of what went wrong.
        message: String,
    },
}

/// The read-only table of region records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<RegionRecord>,
    source: DataSourceInfo,
    weights: SeverityWeights,
    maxima: CategoryMaxima,
}

impl Dataset {
    pub(crate) const fn new(
        records: Vec<RegionRecord>,
        source: DataSourceInfo,
        weights: SeverityWeights,
        maxima: CategoryMaxima,
    ) -> Self {
        Self {
            records,
            source,
            weights,
            maxima,
        }
    }

    /// Builds the dataset from the shipped NCRB reference figures.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the embedded reference data is invalid.
    pub fn shipped() -> Result<Self, DatasetError> {
        DatasetBuilder::shipped()?.build()
    }

    /// All records in canonical order.
    #[must_use]
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    /// Number of regions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no regions. Never true for a built dataset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a region by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegionRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Values of `metric` for every region, in canonical order.
    pub fn metric_values(&self, metric: Metric) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.value(metric))
    }

    /// Dataset maximum of `metric`.
    ///
    /// For raw incident metrics this is the normalization maximum used by
    /// the composite score.
    #[must_use]
    pub fn max(&self, metric: Metric) -> f64 {
        if metric.is_crime_rate() {
            self.maxima.of(metric)
        } else {
            self.metric_values(metric).fold(f64::NEG_INFINITY, f64::max)
        }
    }

    /// Provenance and map defaults.
    #[must_use]
    pub const fn source(&self) -> &DataSourceInfo {
        &self.source
    }

    /// Severity weights the composite score was computed with.
    #[must_use]
    pub const fn weights(&self) -> &SeverityWeights {
        &self.weights
    }
}
