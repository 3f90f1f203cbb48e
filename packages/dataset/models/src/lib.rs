#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Region record and export row types.
//!
//! [`RegionRecord`] is the in-memory shape of one row of the safety map
//! table. [`ExportRow`] is the flat shape written to and read from the CSV
//! export. They are kept separate so the export columns can stay stable
//! while the in-memory record evolves.

use chrono::NaiveDate;
use safety_map_crime_models::Metric;
use safety_map_geography_models::Coordinates;
use serde::{Deserialize, Serialize};

/// One administrative region (state or union territory) with its incident
/// rates and derived safety score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Unique region name.
    pub name: String,
    /// Theft incidents per 100,000 population.
    pub theft: f64,
    /// Burglary incidents per 100,000 population.
    pub burglary: f64,
    /// Assault incidents per 100,000 population.
    pub assault: f64,
    /// Sexual violence incidents per 100,000 population.
    pub sexual_violence: f64,
    /// Other threats per 100,000 population.
    pub other_threats: f64,
    /// Composite safety score derived from the five rates.
    pub overall_safety_score: f64,
    /// Population in millions.
    pub population: f64,
    /// Representative map coordinate.
    pub coordinates: Coordinates,
}

impl RegionRecord {
    /// Returns this region's value for the given metric.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::OverallSafetyScore => self.overall_safety_score,
            Metric::Theft => self.theft,
            Metric::Burglary => self.burglary,
            Metric::Assault => self.assault,
            Metric::SexualViolence => self.sexual_violence,
            Metric::OtherThreats => self.other_threats,
        }
    }
}

/// Provenance and map defaults shipped with the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceInfo {
    /// Publishing agency, e.g. "National Crime Records Bureau (NCRB)".
    pub name: String,
    /// Date the figures were last updated.
    pub data_timestamp: NaiveDate,
    /// Default map center.
    pub map_center: Coordinates,
    /// Default projection zoom factor for the spatial view.
    pub projection_scale: f64,
}

impl DataSourceInfo {
    /// Month and year of the data timestamp, e.g. `"December 2023"`.
    #[must_use]
    pub fn last_updated_label(&self) -> String {
        self.data_timestamp.format("%B %Y").to_string()
    }
}

/// Column names of the CSV export, in order.
pub const EXPORT_HEADERS: &[&str] = &[
    "state",
    "theft",
    "burglary",
    "assault",
    "sexual_violence",
    "other_threats",
    "overall_safety_score",
    "population",
    "latitude",
    "longitude",
    "data_timestamp",
];

/// A flat CSV row of the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
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
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Data timestamp (`YYYY-MM-DD`).
    pub data_timestamp: NaiveDate,
}

impl ExportRow {
    /// Flattens a record into an export row.
    #[must_use]
    pub fn from_record(record: &RegionRecord, data_timestamp: NaiveDate) -> Self {
        Self {
            state: record.name.clone(),
            theft: record.theft,
            burglary: record.burglary,
            assault: record.assault,
            sexual_violence: record.sexual_violence,
            other_threats: record.other_threats,
            overall_safety_score: record.overall_safety_score,
            population: record.population,
            latitude: record.coordinates.latitude,
            longitude: record.coordinates.longitude,
            data_timestamp,
        }
    }
}

impl From<ExportRow> for RegionRecord {
    fn from(row: ExportRow) -> Self {
        Self {
            name: row.state,
            theft: row.theft,
            burglary: row.burglary,
            assault: row.assault,
            sexual_violence: row.sexual_violence,
            other_threats: row.other_threats,
            overall_safety_score: row.overall_safety_score,
            population: row.population,
            coordinates: Coordinates::new(row.latitude, row.longitude),
        }
    }
}
