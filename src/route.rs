//! Route extraction from Tmap routing responses.
//!
//! A routing response is a GeoJSON-like `features` array in traversal order.
//! `LineString` features carry the road geometry; `Point` features mark
//! turns and POIs. The path a traveller follows is the concatenation of the
//! `LineString` coordinates, up to and including the feature whose
//! `description` is the arrival marker.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, Path, Result};

/// `description` value Tmap puts on the destination step.
pub const ARRIVAL_MARKER: &str = "도착";

/// Parsed routing response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub features: Vec<RouteFeature>,
}

impl RouteResponse {
    /// Parse a raw response body. A body without a `features` array (such
    /// as Tmap's `{"error": ...}` payload) is rejected here, before any
    /// extraction runs.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Shorthand for [`extract_path`] over all features.
    pub fn path(&self, config: &ExtractConfig) -> Path {
        extract_path(&self.features, config)
    }

    /// Route totals, which Tmap reports on the first feature only.
    pub fn summary(&self) -> Option<RouteSummary> {
        let props = &self.features.first()?.properties;
        Some(RouteSummary {
            distance_m: props.total_distance?,
            duration_s: props.total_time?,
        })
    }
}

/// Total distance (metres) and travel time (seconds) of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// One entry of the `features` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFeature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

impl RouteFeature {
    pub fn is_arrival(&self, marker: &str) -> bool {
        self.properties.description.as_deref() == Some(marker)
    }
}

/// Feature geometry, tagged by its GeoJSON `type`. Positions are
/// longitude-first pairs, exactly as received.
///
/// The coordinate shape must match the tag: a `LineString` whose positions
/// are not `[lon, lat]` number pairs fails the whole parse. Only geometry
/// types this crate never draws fall through to [`Geometry::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    /// Polygons and the like.
    #[serde(other)]
    Other,
}

impl Geometry {
    pub fn positions(&self) -> &[[f64; 2]] {
        match self {
            Geometry::Point { coordinates } => std::slice::from_ref(coordinates),
            Geometry::LineString { coordinates } => coordinates,
            Geometry::Other => &[],
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Geometry::LineString { .. })
    }
}

/// Descriptive properties of a feature. Only `description` drives
/// extraction; the rest is kept for callers that render turn-by-turn text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    pub index: Option<u32>,
    pub point_index: Option<u32>,
    pub line_index: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub turn_type: Option<i32>,
    /// `SP` start, `EP` end, `PP*`/`GP` intermediate points.
    pub point_type: Option<String>,
    /// Segment distance in metres.
    pub distance: Option<f64>,
    /// Segment time in seconds.
    pub time: Option<f64>,
    pub total_distance: Option<f64>,
    pub total_time: Option<f64>,
}

/// Extraction options.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// `description` value that ends extraction.
    /// Default: [`ARRIVAL_MARKER`]
    pub arrival_marker: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            arrival_marker: ARRIVAL_MARKER.to_string(),
        }
    }
}

/// Turn routing features into the ordered path a traveller passes through.
///
/// - Features are visited in the order given.
/// - Each `LineString` contributes its coordinates, flipped to lat/lon.
/// - `Point` and unrecognised geometries contribute nothing.
/// - The arrival feature is handled, then iteration stops; later features
///   are never pulled from `features`.
///
/// No arrival marker means every feature is consumed. No `LineString`
/// before the marker gives an empty path.
pub fn extract_path<'a, I>(features: I, config: &ExtractConfig) -> Path
where
    I: IntoIterator<Item = &'a RouteFeature>,
{
    let mut path = Path::new();

    for (index, feature) in features.into_iter().enumerate() {
        if feature.geometry.is_line() {
            path.extend(
                feature
                    .geometry
                    .positions()
                    .iter()
                    .map(|&pair| Coordinate::from_wire(pair)),
            );
        }

        if feature.is_arrival(&config.arrival_marker) {
            debug!("Arrival marker at feature {}, path has {} points", index, path.len());
            return path;
        }
    }

    debug!("No arrival marker in response, path has {} points", path.len());
    path
}
