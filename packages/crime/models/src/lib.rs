#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime metric taxonomy, severity weights, and presentation policy.
//!
//! This crate defines the closed set of metrics the safety map can display:
//! five raw incident categories plus the derived composite safety score.
//! Every place that needs to behave differently depending on the selected
//! metric (sort order, color scale, axis labels) goes through the
//! [`MetricPolicy`] table returned by [`Metric::policy`] instead of
//! branching on the metric itself.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A metric that can be selected, filtered on, and visualized.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    /// Weighted, max-normalized composite of the five incident rates.
    /// Higher is safer.
    OverallSafetyScore,
    /// Theft incidents per 100,000 population.
    Theft,
    /// Burglary incidents per 100,000 population.
    Burglary,
    /// Assault incidents per 100,000 population.
    Assault,
    /// Sexual violence incidents per 100,000 population.
    SexualViolence,
    /// Other threats per 100,000 population.
    OtherThreats,
}

impl Metric {
    /// Parses a metric from its `snake_case` name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownMetricError`] if the name is not one of the six
    /// supported metrics. There is no fallback metric.
    pub fn parse(name: &str) -> Result<Self, UnknownMetricError> {
        name.parse().map_err(|_| UnknownMetricError {
            name: name.to_string(),
        })
    }

    /// Returns all metrics in selector order (composite score first).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::OverallSafetyScore,
            Self::Theft,
            Self::Burglary,
            Self::Assault,
            Self::SexualViolence,
            Self::OtherThreats,
        ]
    }

    /// Returns the five raw incident-rate metrics, in export column order.
    #[must_use]
    pub const fn crime_rates() -> &'static [Self] {
        &[
            Self::Theft,
            Self::Burglary,
            Self::Assault,
            Self::SexualViolence,
            Self::OtherThreats,
        ]
    }

    /// Whether this metric is a raw incident rate (as opposed to the
    /// derived composite score).
    #[must_use]
    pub const fn is_crime_rate(self) -> bool {
        !matches!(self, Self::OverallSafetyScore)
    }

    /// Human-readable title, e.g. `"Sexual Violence"`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::OverallSafetyScore => "Overall Safety Score",
            Self::Theft => "Theft",
            Self::Burglary => "Burglary",
            Self::Assault => "Assault",
            Self::SexualViolence => "Sexual Violence",
            Self::OtherThreats => "Other Threats",
        }
    }

    /// Explanatory note shown next to a view of this metric.
    #[must_use]
    pub fn description(self) -> String {
        if self.is_crime_rate() {
            format!(
                "The {} rate represents incidents per 100,000 population. \
                 Lower rates indicate safer regions.",
                self.title().to_lowercase()
            )
        } else {
            "The overall safety score is calculated by weighting various crime types by \
             their severity. Higher scores indicate safer regions."
                .to_string()
        }
    }

    /// Returns the presentation policy for this metric.
    #[must_use]
    pub const fn policy(self) -> &'static MetricPolicy {
        if self.is_crime_rate() {
            &CRIME_RATE_POLICY
        } else {
            &SAFETY_SCORE_POLICY
        }
    }
}

/// Error returned when a metric name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetricError {
    /// The name that failed to parse.
    pub name: String,
}

impl std::fmt::Display for UnknownMetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown metric '{}': expected one of overall_safety_score, theft, burglary, \
             assault, sexual_violence, other_threats",
            self.name
        )
    }
}

impl std::error::Error for UnknownMetricError {}

/// Continuous color scale used to encode a metric's value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ColorScale {
    /// Red (low) through yellow to green (high).
    #[serde(rename = "RdYlGn")]
    #[strum(serialize = "RdYlGn")]
    RedYellowGreen,
    /// Green (low) through yellow to red (high).
    #[serde(rename = "RdYlGn_r")]
    #[strum(serialize = "RdYlGn_r")]
    RedYellowGreenReversed,
}

/// Ordering applied to ranked views.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// How a metric is oriented and presented.
///
/// Both policies put the most concerning regions first in ranked views:
/// the lowest scores for the composite score, the highest rates for raw
/// incident metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricPolicy {
    /// Whether larger values mean a safer region.
    pub higher_is_safer: bool,
    /// Color scale, oriented so that green is always the safe end.
    pub color_scale: ColorScale,
    /// Ranked-view ordering.
    pub sort_direction: SortDirection,
    /// Value axis / legend label.
    pub axis_label: &'static str,
    /// Label for the region at the safe extreme.
    pub safer_label: &'static str,
    /// Label for the region at the risky extreme.
    pub riskier_label: &'static str,
}

/// Policy for the composite safety score.
pub const SAFETY_SCORE_POLICY: MetricPolicy = MetricPolicy {
    higher_is_safer: true,
    color_scale: ColorScale::RedYellowGreen,
    sort_direction: SortDirection::Ascending,
    axis_label: "Safety Score",
    safer_label: "Safest State",
    riskier_label: "Most Vulnerable State",
};

/// Policy for raw incident-rate metrics.
pub const CRIME_RATE_POLICY: MetricPolicy = MetricPolicy {
    higher_is_safer: false,
    color_scale: ColorScale::RedYellowGreenReversed,
    sort_direction: SortDirection::Descending,
    axis_label: "Crime Rate per 100,000",
    safer_label: "Lowest Rate",
    riskier_label: "Highest Rate",
};

/// Severity weights applied to max-normalized incident rates when
/// computing the composite safety score.
///
/// The weights do not need to sum to 1. Missing fields in a deserialized
/// table fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    /// Weight for theft.
    pub theft: f64,
    /// Weight for burglary.
    pub burglary: f64,
    /// Weight for assault.
    pub assault: f64,
    /// Weight for sexual violence.
    pub sexual_violence: f64,
    /// Weight for other threats.
    pub other_threats: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            theft: 0.15,
            burglary: 0.20,
            assault: 0.20,
            sexual_violence: 0.35,
            other_threats: 0.10,
        }
    }
}

impl SeverityWeights {
    /// Returns the weight for a raw incident metric. The composite score
    /// itself carries no weight.
    #[must_use]
    pub const fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::OverallSafetyScore => 0.0,
            Metric::Theft => self.theft,
            Metric::Burglary => self.burglary,
            Metric::Assault => self.assault,
            Metric::SexualViolence => self.sexual_violence,
            Metric::OtherThreats => self.other_threats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_roundtrip() {
        for metric in Metric::all() {
            let name = metric.to_string();
            assert_eq!(Metric::parse(&name).unwrap(), *metric, "{name}");
        }
        assert_eq!(Metric::OverallSafetyScore.as_ref(), "overall_safety_score");
        assert_eq!(Metric::SexualViolence.as_ref(), "sexual_violence");
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = Metric::parse("robbery").unwrap_err();
        assert_eq!(err.name, "robbery");
        assert!(Metric::parse("").is_err());
        assert!(Metric::parse("Theft").is_err());
        assert!(Metric::parse(" theft ").is_err());
        assert!(Metric::parse("theft\n").is_err());
    }

    #[test]
    fn crime_rates_exclude_composite_score() {
        assert_eq!(Metric::crime_rates().len(), 5);
        assert!(!Metric::crime_rates().contains(&Metric::OverallSafetyScore));
        assert!(Metric::crime_rates().iter().all(|m| m.is_crime_rate()));
        assert!(!Metric::OverallSafetyScore.is_crime_rate());
    }

    #[test]
    fn policy_flips_with_metric() {
        let score = Metric::OverallSafetyScore.policy();
        assert!(score.higher_is_safer);
        assert_eq!(score.color_scale, ColorScale::RedYellowGreen);
        assert_eq!(score.sort_direction, SortDirection::Ascending);

        for metric in Metric::crime_rates() {
            let policy = metric.policy();
            assert!(!policy.higher_is_safer);
            assert_eq!(policy.color_scale, ColorScale::RedYellowGreenReversed);
            assert_eq!(policy.sort_direction, SortDirection::Descending);
        }
    }

    #[test]
    fn color_scale_names() {
        assert_eq!(ColorScale::RedYellowGreen.to_string(), "RdYlGn");
        assert_eq!(ColorScale::RedYellowGreenReversed.to_string(), "RdYlGn_r");
    }

    #[test]
    fn default_weights() {
        let weights = SeverityWeights::default();
        assert!((weights.weight(Metric::Theft) - 0.15).abs() < f64::EPSILON);
        assert!((weights.weight(Metric::SexualViolence) - 0.35).abs() < f64::EPSILON);
        assert!(weights.weight(Metric::OverallSafetyScore).abs() < f64::EPSILON);
    }

    #[test]
    fn descriptions_mention_direction() {
        assert!(Metric::Theft.description().contains("theft rate"));
        assert!(
            Metric::OtherThreats
                .description()
                .contains("other threats rate")
        );
        assert!(
            Metric::OverallSafetyScore
                .description()
                .contains("Higher scores")
        );
    }
}
