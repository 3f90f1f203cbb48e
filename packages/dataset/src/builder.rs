//! Dataset construction and composite safety score computation.
//!
//! The builder walks the canonical region list, looks every region up in
//! each reference mapping, validates the values, and then derives the
//! composite safety score from per-category dataset maxima.

use std::collections::{BTreeMap, BTreeSet};

use safety_map_crime_models::{Metric, SeverityWeights};
use safety_map_dataset_models::RegionRecord;
use safety_map_geography_models::Coordinates;

use crate::reference::ReferenceData;
use crate::{Dataset, DatasetError};

/// Per-category maxima across every region in a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMaxima {
    maxima: BTreeMap<Metric, f64>,
}

impl CategoryMaxima {
    /// Computes the maximum of each raw incident metric over `records`.
    ///
    /// Rates are non-negative, so an empty slice yields zero maxima.
    #[must_use]
    pub fn from_records(records: &[RegionRecord]) -> Self {
        let maxima = Metric::crime_rates()
            .iter()
            .map(|&metric| {
                let max = records
                    .iter()
                    .map(|r| r.value(metric))
                    .fold(0.0_f64, f64::max);
                (metric, max)
            })
            .collect();

        Self { maxima }
    }

    /// Returns the dataset maximum of a raw incident metric (zero for the
    /// composite score).
    #[must_use]
    pub fn of(&self, metric: Metric) -> f64 {
        self.maxima.get(&metric).copied().unwrap_or(0.0)
    }
}

/// Weighted, max-normalized contribution of one category.
///
/// A zero maximum means every region reports zero for the category; the
/// term is zero instead of `0 / 0`.
#[must_use]
pub const fn normalized_term(value: f64, max: f64, weight: f64) -> f64 {
    if max > 0.0 {
        weight * (value / max)
    } else {
        0.0
    }
}

/// Computes the composite safety score for one record:
/// `100 - 100 * sum(weight * value / max)` over the five categories.
#[must_use]
pub fn composite_score(
    record: &RegionRecord,
    maxima: &CategoryMaxima,
    weights: &SeverityWeights,
) -> f64 {
    let risk: f64 = Metric::crime_rates()
        .iter()
        .map(|&metric| {
            normalized_term(
                record.value(metric),
                maxima.of(metric),
                weights.weight(metric),
            )
        })
        .sum();

    risk.mul_add(-100.0, 100.0)
}

/// Builds a [`Dataset`] from [`ReferenceData`].
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    reference: ReferenceData,
    weights: Option<SeverityWeights>,
}

impl DatasetBuilder {
    /// Creates a builder over the given reference data.
    #[must_use]
    pub const fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            weights: None,
        }
    }

    /// Creates a builder over the shipped NCRB reference data.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Reference`] if the embedded data fails to
    /// parse.
    pub fn shipped() -> Result<Self, DatasetError> {
        Ok(Self::new(ReferenceData::shipped()?))
    }

    /// Overrides the severity weights from the reference document.
    #[must_use]
    pub const fn weights(mut self, weights: SeverityWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Validates the reference data and builds the dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the region list is empty or contains
    /// duplicates, if any region is missing from any mapping, or if any
    /// value is out of range.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let Self { reference, weights } = self;
        let weights = weights.unwrap_or(reference.weights);

        if reference.regions.is_empty() {
            return Err(DatasetError::EmptyRegionList);
        }

        let mut seen = BTreeSet::new();
        for region in &reference.regions {
            if !seen.insert(region.as_str()) {
                return Err(DatasetError::DuplicateRegion {
                    region: region.clone(),
                });
            }
        }

        for (field, keys) in reference.mapping_keys() {
            for key in keys.into_iter().filter(|k| !seen.contains(k)) {
                log::warn!("Ignoring {field} entry for unknown region '{key}'");
            }
        }

        let mut records = reference
            .regions
            .iter()
            .map(|region| build_record(&reference, region))
            .collect::<Result<Vec<_>, _>>()?;

        let maxima = CategoryMaxima::from_records(&records);
        for metric in Metric::crime_rates() {
            if maxima.of(*metric) <= 0.0 {
                log::warn!("Every region reports zero {metric}; its score term is zero");
            }
        }

        for record in &mut records {
            record.overall_safety_score = composite_score(record, &maxima, &weights);
        }

        log::debug!(
            "Built dataset with {} regions from {}",
            records.len(),
            reference.source.name
        );

        Ok(Dataset::new(records, reference.source.into(), weights, maxima))
    }
}

/// Looks up and validates every field of one region. The composite score
/// is left at zero until the maxima are known.
fn build_record(reference: &ReferenceData, region: &str) -> Result<RegionRecord, DatasetError> {
    let rate = |metric: Metric| -> Result<f64, DatasetError> {
        let value = reference
            .rates(metric)
            .and_then(|mapping| mapping.get(region))
            .copied()
            .ok_or_else(|| DatasetError::MissingValue {
                region: region.to_string(),
                field: metric.to_string(),
            })?;

        if !value.is_finite() || value < 0.0 {
            return Err(DatasetError::InvalidValue {
                region: region.to_string(),
                field: metric.to_string(),
                value,
            });
        }

        Ok(value)
    };

    let population = reference
        .population
        .get(region)
        .copied()
        .ok_or_else(|| DatasetError::MissingValue {
            region: region.to_string(),
            field: "population".to_string(),
        })?;
    if !population.is_finite() || population <= 0.0 {
        return Err(DatasetError::InvalidValue {
            region: region.to_string(),
            field: "population".to_string(),
            value: population,
        });
    }

    let coordinates = reference
        .coordinates
        .get(region)
        .copied()
        .map(Coordinates::from)
        .ok_or_else(|| DatasetError::MissingValue {
            region: region.to_string(),
            field: "coordinates".to_string(),
        })?;
    if !coordinates.is_valid() {
        return Err(DatasetError::InvalidCoordinates {
            region: region.to_string(),
        });
    }

    Ok(RegionRecord {
        name: region.to_string(),
        theft: rate(Metric::Theft)?,
        burglary: rate(Metric::Burglary)?,
        assault: rate(Metric::Assault)?,
        sexual_violence: rate(Metric::SexualViolence)?,
        other_threats: rate(Metric::OtherThreats)?,
        overall_safety_score: 0.0,
        population,
        coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_REGIONS: &str = r#"
        regions = ["North", "South"]

        [source]
        name = "Test Bureau"
        data_timestamp = "2024-06-30"
        map_center = { latitude = 20.0, longitude = 80.0 }
        projection_scale = 4.0

        [theft]
        North = 10.0
        South = 20.0

        [burglary]
        North = 5.0
        South = 5.0

        [assault]
        North = 0.0
        South = 4.0

        [sexual_violence]
        North = 1.0
        South = 2.0

        [other_threats]
        North = 3.0
        South = 6.0

        [population]
        North = 10.0
        South = 2.5

        [coordinates]
        North = [28.0, 77.0]
        South = [12.0, 78.0]
    "#;

    fn reference(toml: &str) -> ReferenceData {
        ReferenceData::from_toml_str(toml).unwrap()
    }

    #[test]
    fn builds_shipped_dataset_in_canonical_order() {
        let dataset = DatasetBuilder::shipped().unwrap().build().unwrap();
        let reference = ReferenceData::shipped().unwrap();
        let names: Vec<&str> = dataset.records().iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = reference.regions.iter().map(String::as_str).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn every_metric_is_finite() {
        let dataset = DatasetBuilder::shipped().unwrap().build().unwrap();
        for record in dataset.records() {
            for metric in Metric::all() {
                assert!(
                    record.value(*metric).is_finite(),
                    "{} {metric} not finite",
                    record.name
                );
            }
        }
    }

    #[test]
    fn shipped_scores_stay_within_bounds() {
        let dataset = DatasetBuilder::shipped().unwrap().build().unwrap();
        for record in dataset.records() {
            assert!(
                (0.0..=100.0).contains(&record.overall_safety_score),
                "{} score {}",
                record.name,
                record.overall_safety_score
            );
        }
    }

    #[test]
    fn region_with_every_maximum_scores_zero() {
        // Delhi holds the maximum of every category and the default
        // weights sum to one.
        let dataset = DatasetBuilder::shipped().unwrap().build().unwrap();
        let delhi = dataset.get("Delhi").unwrap();
        assert!(delhi.overall_safety_score.abs() < 1e-9);
    }

    #[test]
    fn known_shipped_scores() {
        let dataset = DatasetBuilder::shipped().unwrap().build().unwrap();
        let nagaland = dataset.get("Nagaland").unwrap();
        assert!((nagaland.overall_safety_score - 82.2336).abs() < 1e-3);
        let goa = dataset.get("Goa").unwrap();
        assert!((goa.overall_safety_score - 72.3039).abs() < 1e-3);
    }

    #[test]
    fn score_uses_dataset_relative_maxima() {
        let data = reference(TWO_REGIONS);
        let dataset = DatasetBuilder::new(data).build().unwrap();
        let north = dataset.get("North").unwrap();
        // 0.15*0.5 + 0.20*1.0 + 0.20*0.0 + 0.35*0.5 + 0.10*0.5 = 0.5
        assert!((north.overall_safety_score - 50.0).abs() < 1e-9);
        let south = dataset.get("South").unwrap();
        assert!(south.overall_safety_score.abs() < 1e-9);
    }

    #[test]
    fn weights_can_be_overridden() {
        let weights = SeverityWeights {
            theft: 1.0,
            burglary: 0.0,
            assault: 0.0,
            sexual_violence: 0.0,
            other_threats: 0.0,
        };
        let dataset = DatasetBuilder::new(reference(TWO_REGIONS))
            .weights(weights)
            .build()
            .unwrap();
        let north = dataset.get("North").unwrap();
        assert!((north.overall_safety_score - 50.0).abs() < 1e-9);
        assert_eq!(dataset.weights(), &weights);
    }

    #[test]
    fn all_zero_category_contributes_nothing() {
        let mut data = reference(TWO_REGIONS);
        for value in data.assault.values_mut() {
            *value = 0.0;
        }
        let dataset = DatasetBuilder::new(data).build().unwrap();
        assert!(dataset.max(Metric::Assault).abs() < f64::EPSILON);
        for record in dataset.records() {
            assert!(record.overall_safety_score.is_finite());
            assert!(
                normalized_term(record.assault, dataset.max(Metric::Assault), 0.20).abs()
                    < f64::EPSILON
            );
        }
        let north = dataset.get("North").unwrap();
        assert!((north.overall_safety_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_mapping_entry_is_fatal() {
        let mut data = reference(TWO_REGIONS);
        data.sexual_violence.remove("South");
        let err = DatasetBuilder::new(data).build().unwrap_err();
        match err {
            DatasetError::MissingValue { region, field } => {
                assert_eq!(region, "South");
                assert_eq!(field, "sexual_violence");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_population_and_coordinates_are_fatal() {
        let mut data = reference(TWO_REGIONS);
        data.population.remove("North");
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::MissingValue { ref field, .. }) if field == "population"
        ));

        let mut data = reference(TWO_REGIONS);
        data.coordinates.remove("North");
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::MissingValue { ref field, .. }) if field == "coordinates"
        ));
    }

    #[test]
    fn invalid_values_are_fatal() {
        let mut data = reference(TWO_REGIONS);
        data.theft.insert("North".to_string(), -1.0);
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::InvalidValue { .. })
        ));

        let mut data = reference(TWO_REGIONS);
        data.population.insert("South".to_string(), 0.0);
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::InvalidValue { .. })
        ));

        let mut data = reference(TWO_REGIONS);
        data.coordinates.insert("South".to_string(), [120.0, 0.0]);
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn duplicate_and_empty_region_lists_are_fatal() {
        let mut data = reference(TWO_REGIONS);
        data.regions.push("North".to_string());
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::DuplicateRegion { .. })
        ));

        let mut data = reference(TWO_REGIONS);
        data.regions.clear();
        assert!(matches!(
            DatasetBuilder::new(data).build(),
            Err(DatasetError::EmptyRegionList)
        ));
    }

    #[test]
    fn extra_mapping_entries_are_ignored() {
        let mut data = reference(TWO_REGIONS);
        data.theft.insert("Atlantis".to_string(), 1000.0);
        let dataset = DatasetBuilder::new(data).build().unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.get("Atlantis").is_none());
        assert!((dataset.max(Metric::Theft) - 20.0).abs() < f64::EPSILON);
    }
}
