//! # waypath
//!
//! Walking and driving routes over the Tmap APIs, plus "where have I been
//! near here?" lookups over a location-history export.
//!
//! This library provides:
//! - Forward and reverse geocoding ([`Geocoder`])
//! - Route requests and extraction of a drawable [`Path`] from the response
//! - Waypoint (`passList`) encoding
//! - Haversine nearest-neighbor search over a [`LocationHistory`]
//!
//! ## Features
//!
//! - **`http`** (default) - Blocking Tmap client ([`TmapClient`])
//! - **`parallel`** - Compute history distances with rayon
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use waypath::{extract_path, ExtractConfig, RouteResponse};
//!
//! let body = r#"{"features": [
//!     {"geometry": {"type": "Point", "coordinates": [127.0276, 37.4979]},
//!      "properties": {"description": "출발"}},
//!     {"geometry": {"type": "LineString",
//!                   "coordinates": [[127.0276, 37.4979], [127.0281, 37.4985]]},
//!      "properties": {"description": "도착"}}
//! ]}"#;
//!
//! let response = RouteResponse::from_json(body).unwrap();
//! let path = extract_path(&response.features, &ExtractConfig::default());
//! assert_eq!(path.len(), 2);
//! assert_eq!(path.points()[0].latitude, 37.4979);
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod geo_utils;

pub mod config;
pub use config::TmapConfig;

// Route extraction from routing responses
pub mod route;
pub use route::{
    extract_path, ExtractConfig, FeatureProperties, Geometry, RouteFeature, RouteResponse,
    RouteSummary, ARRIVAL_MARKER,
};

pub mod waypoint;
pub use waypoint::{encode_waypoints, COORDINATE_SEPARATOR, WAYPOINT_SEPARATOR};

pub mod geocode;
pub use geocode::Geocoder;

pub mod routing;
pub use routing::{RouteProvider, RouteRequest, TravelMode};

pub mod planner;
pub use planner::{PlannedRoute, RoutePlanner};

// Location history and nearest-visit lookups
pub mod history;
pub use history::{HistorySample, LocationHistory, RawLocationRecord, ACCURACY_THRESHOLD};

pub mod nearest;
pub use nearest::{k_nearest, Center, NearestNeighborFinder, Neighbor, NeighborResult};

// HTTP client for the Tmap APIs
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::TmapClient;

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate in decimal degrees.
///
/// Internally always latitude first. The routing wire format is longitude
/// first; use [`Coordinate::from_wire`] / [`Coordinate::to_wire`] at that
/// boundary.
///
/// # Example
/// ```
/// use waypath::Coordinate;
/// let gangnam = Coordinate::new(37.4979, 127.0276);
/// assert!(gangnam.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude).validated()
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Return `self` if valid, otherwise an [`Error::InvalidCoordinate`].
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Build from a `[longitude, latitude]` wire pair.
    pub fn from_wire(pair: [f64; 2]) -> Self {
        let [latitude, longitude] = flip(pair);
        Self { latitude, longitude }
    }

    /// Back to `[longitude, latitude]` wire order.
    pub fn to_wire(&self) -> [f64; 2] {
        flip([self.latitude, self.longitude])
    }
}

/// Swap the two components of a coordinate pair.
#[inline]
pub fn flip(pair: [f64; 2]) -> [f64; 2] {
    [pair[1], pair[0]]
}

/// Bounding box, e.g. for fitting a map viewport to a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// An ordered travel route, as a renderer would draw it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Coordinate>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs; a path of `n` points yields `n - 1` segments.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        geo_utils::compute_bounds(&self.points)
    }

    /// Centre of the bounding box, used to position the initial map view.
    pub fn center(&self) -> Option<Coordinate> {
        self.bounds().map(|b| b.center())
    }

    /// Length along the path in kilometres.
    pub fn length_km(&self) -> f64 {
        geo_utils::polyline_length(&self.points)
    }

    /// Convert to a `geo` line string (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.points
            .iter()
            .map(|p| geo::Coord { x: p.longitude, y: p.latitude })
            .collect()
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

impl FromIterator<Coordinate> for Path {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

impl Extend<Coordinate> for Path {
    fn extend<I: IntoIterator<Item = Coordinate>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

// ============================================================================
// Tests
// ============================================================================
