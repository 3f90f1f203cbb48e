//! Reference data: the fixed per-region figures the dataset is built from.
//!
//! The shipped figures live in `data/ncrb_2023.toml` and are baked into the
//! binary at compile time via [`include_str!`]. Each incident category is a
//! separate `region name -> value` table so that a region missing from any
//! one of them is caught by the builder instead of silently defaulting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use safety_map_crime_models::{Metric, SeverityWeights};
use safety_map_dataset_models::DataSourceInfo;
use safety_map_geography_models::Coordinates;
use serde::Deserialize;

use crate::DatasetError;

/// NCRB figures embedded at compile time.
const SHIPPED_REFERENCE_TOML: &str = include_str!("../data/ncrb_2023.toml");

/// Raw reference mappings, before validation and score computation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceData {
    /// Canonical region list. Order here is display order everywhere.
    pub regions: Vec<String>,
    /// Provenance and map defaults.
    pub source: ReferenceSource,
    /// Severity weights for the composite score.
    #[serde(default)]
    pub weights: SeverityWeights,
    /// Theft rate per region.
    #[serde(default)]
    pub theft: BTreeMap<String, f64>,
    /// Burglary rate per region.
    #[serde(default)]
    pub burglary: BTreeMap<String, f64>,
    /// Assault rate per region.
    #[serde(default)]
    pub assault: BTreeMap<String, f64>,
    /// Sexual violence rate per region.
    #[serde(default)]
    pub sexual_violence: BTreeMap<String, f64>,
    /// Other threats rate per region.
    #[serde(default)]
    pub other_threats: BTreeMap<String, f64>,
    /// Population (millions) per region.
    #[serde(default)]
    pub population: BTreeMap<String, f64>,
    /// `[latitude, longitude]` per region.
    #[serde(default)]
    pub coordinates: BTreeMap<String, [f64; 2]>,
}

/// The `[source]` table of a reference document.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSource {
    /// Publishing agency.
    pub name: String,
    /// Date the figures were last updated (`YYYY-MM-DD`).
    pub data_timestamp: NaiveDate,
    /// Default map center.
    pub map_center: Coordinates,
    /// Default projection zoom factor.
    pub projection_scale: f64,
}

impl From<ReferenceSource> for DataSourceInfo {
    fn from(source: ReferenceSource) -> Self {
        Self {
            name: source.name,
            data_timestamp: source.data_timestamp,
            map_center: source.map_center,
            projection_scale: source.projection_scale,
        }
    }
}

impl ReferenceData {
    /// Parses a reference document from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Reference`] if the document is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, DatasetError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the NCRB reference figures shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Reference`] if the embedded document fails to
    /// parse.
    pub fn shipped() -> Result<Self, DatasetError> {
        Self::from_toml_str(SHIPPED_REFERENCE_TOML)
    }

    /// Returns the mapping for a raw incident metric, or `None` for the
    /// composite score, which has no reference mapping.
    #[must_use]
    pub const fn rates(&self, metric: Metric) -> Option<&BTreeMap<String, f64>> {
        match metric {
            Metric::OverallSafetyScore => None,
            Metric::Theft => Some(&self.theft),
            Metric::Burglary => Some(&self.burglary),
            Metric::Assault => Some(&self.assault),
            Metric::SexualViolence => Some(&self.sexual_violence),
            Metric::OtherThreats => Some(&self.other_threats),
        }
    }

    /// Names of every mapping paired with the keys it contains.
    pub(crate) fn mapping_keys(&self) -> Vec<(&'static str, Vec<&str>)> {
        fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
            map.keys().map(String::as_str).collect()
        }

        vec![
            ("theft", keys(&self.theft)),
            ("burglary", keys(&self.burglary)),
            ("assault", keys(&self.assault)),
            ("sexual_violence", keys(&self.sexual_violence)),
            ("other_threats", keys(&self.other_threats)),
            ("population", keys(&self.population)),
            ("coordinates", keys(&self.coordinates)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_reference_parses() {
        let reference = ReferenceData::shipped().unwrap();
        assert_eq!(reference.regions.len(), 31);
        assert_eq!(
            reference.regions.first().map(String::as_str),
            Some("Andhra Pradesh")
        );
        assert_eq!(
            reference.regions.last().map(String::as_str),
            Some("Puducherry")
        );
        assert_eq!(
            reference.source.name,
            "National Crime Records Bureau (NCRB)"
        );
        assert_eq!(
            reference.source.data_timestamp,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(reference.weights, SeverityWeights::default());
    }

    #[test]
    fn every_mapping_covers_every_shipped_region() {
        let reference = ReferenceData::shipped().unwrap();
        for (field, keys) in reference.mapping_keys() {
            for region in &reference.regions {
                assert!(
                    keys.contains(&region.as_str()),
                    "{region} missing from {field}"
                );
            }
            assert_eq!(keys.len(), reference.regions.len(), "{field}");
        }
    }

    #[test]
    fn rates_mapping_lookup() {
        let reference = ReferenceData::shipped().unwrap();
        let theft = reference.rates(Metric::Theft).unwrap();
        assert!((theft["Goa"] - 29.6).abs() < f64::EPSILON);
        assert!(reference.rates(Metric::OverallSafetyScore).is_none());
    }

    #[test]
    fn missing_weights_table_uses_defaults() {
        let reference = ReferenceData::from_toml_str(
            r#"
            regions = ["A"]

            [source]
            name = "Test"
            data_timestamp = "2024-01-01"
            map_center = { latitude = 0.0, longitude = 0.0 }
            projection_scale = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(reference.weights, SeverityWeights::default());
        assert!(reference.theft.is_empty());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = ReferenceData::from_toml_str("regions = [").unwrap_err();
        assert!(matches!(err, DatasetError::Reference(_)));
    }
}
