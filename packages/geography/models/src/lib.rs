#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic coordinate and map viewport types.
//!
//! Regions are placed on the map by a single representative coordinate
//! (roughly the state centroid). These types are independent of the crime
//! statistics themselves.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and within the valid degree
    /// ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<[f64; 2]> for Coordinates {
    /// Interprets the array as `[latitude, longitude]`.
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// Camera settings for the spatial view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    /// Point the map is centered on.
    pub center: Coordinates,
    /// Projection zoom factor.
    pub projection_scale: f64,
    /// Extent of the plotted points, `None` when nothing is plotted.
    pub bounds: Option<BoundingBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_from_lat_lon_array() {
        let c = Coordinates::from([28.7041, 77.1025]);
        assert!((c.latitude - 28.7041).abs() < f64::EPSILON);
        assert!((c.longitude - 77.1025).abs() < f64::EPSILON);
        assert!(c.is_valid());
    }

    #[test]
    fn invalid_coordinates() {
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn bounding_box_field_order() {
        let bbox = BoundingBox::new(70.0, 10.0, 95.0, 32.0);
        assert!((bbox.west - 70.0).abs() < f64::EPSILON);
        assert!((bbox.south - 10.0).abs() < f64::EPSILON);
        assert!((bbox.east - 95.0).abs() < f64::EPSILON);
        assert!((bbox.north - 32.0).abs() < f64::EPSILON);
    }
}
