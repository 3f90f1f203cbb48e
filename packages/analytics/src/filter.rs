//! Range filtering over a single metric.

use safety_map_analytics_models::FilterRange;
use safety_map_crime_models::Metric;
use safety_map_dataset::Dataset;
use safety_map_dataset_models::RegionRecord;

/// Returns every record whose `metric` value lies in `range`, in canonical
/// order.
///
/// An inverted or otherwise unsatisfiable range yields an empty subset.
#[must_use]
pub fn filter_regions(dataset: &Dataset, metric: Metric, range: FilterRange) -> Vec<&RegionRecord> {
    if !range.is_valid() {
        log::debug!("Range {range} for {metric} is inverted; nothing matches");
    }

    dataset
        .records()
        .iter()
        .filter(|record| range.contains(record.value(metric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(records: &[&'a RegionRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn theft_under_thirty() {
        let dataset = Dataset::shipped().unwrap();
        let subset = filter_regions(&dataset, Metric::Theft, FilterRange::new(0.0, 30.0));
        let names = names(&subset);
        assert!(names.contains(&"Goa"));
        assert!(!names.contains(&"Andhra Pradesh"));
        assert_eq!(names.len(), 14);
        assert!(subset.iter().all(|r| r.theft <= 30.0));
    }

    #[test]
    fn result_is_exactly_the_matching_records_in_canonical_order() {
        let dataset = Dataset::shipped().unwrap();
        for metric in Metric::all() {
            let range = FilterRange::new(10.0, 40.0);
            let subset = filter_regions(&dataset, *metric, range);
            let expected: Vec<&RegionRecord> = dataset
                .records()
                .iter()
                .filter(|r| (10.0..=40.0).contains(&r.value(*metric)))
                .collect();
            assert_eq!(subset, expected, "{metric}");

            let mut unique = names(&subset);
            unique.dedup();
            assert_eq!(unique.len(), subset.len());
        }
    }

    #[test]
    fn full_range_keeps_everything() {
        let dataset = Dataset::shipped().unwrap();
        let subset = filter_regions(
            &dataset,
            Metric::OverallSafetyScore,
            FilterRange::new(0.0, 100.0),
        );
        assert_eq!(subset.len(), dataset.len());
        assert_eq!(subset[0].name, "Andhra Pradesh");
    }

    #[test]
    fn zero_width_range_below_minimum_is_empty() {
        let dataset = Dataset::shipped().unwrap();
        let subset = filter_regions(&dataset, Metric::Theft, FilterRange::new(0.0, 0.0));
        assert!(subset.is_empty());
    }

    #[test]
    fn zero_width_range_on_exact_value_matches() {
        let dataset = Dataset::shipped().unwrap();
        let subset = filter_regions(&dataset, Metric::Theft, FilterRange::new(29.6, 29.6));
        assert_eq!(names(&subset), vec!["Goa"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let dataset = Dataset::shipped().unwrap();
        let subset = filter_regions(&dataset, Metric::Assault, FilterRange::new(20.0, 1.0));
        assert!(subset.is_empty());
    }
}
