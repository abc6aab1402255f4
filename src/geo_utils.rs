//! # Geographic Utilities
//!
//! Great-circle and bounding-box helpers shared by route extraction and
//! location-history lookups.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two coordinates, in km |
//! | [`polyline_length`] | Total length of a path in km |
//! | [`compute_bounds`] | Bounding box of a set of coordinates |
//!
//! ## Example
//!
//! ```rust
//! use waypath::{Coordinate, geo_utils};
//!
//! let gangnam = Coordinate::new(37.4979, 127.0276);
//! let city_hall = Coordinate::new(37.5663, 126.9779);
//!
//! let km = geo_utils::haversine_distance(&gangnam, &city_hall);
//! assert!(km > 8.0 && km < 9.0);
//! ```
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! With all four angles in radians:
//!
//! ```text
//! a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
//! d = 2·R·asin(√a)
//! ```
//!
//! `R` is [`EARTH_RADIUS_KM`] (6373.0 km). Rounding can push `a` a hair above
//! 1.0 for antipodal points, so it is clamped to `[0, 1]` before the square root.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)

use crate::{Bounds, Coordinate};

/// Earth radius used for every distance in this crate.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric, and zero for identical inputs.
///
/// # Example
///
/// ```rust
/// use waypath::{Coordinate, geo_utils};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// // One degree of longitude on the equator
/// assert!((geo_utils::haversine_distance(&a, &b) - 111.2298).abs() < 0.001);
/// ```
#[inline]
pub fn haversine_distance(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Total length of a polyline in kilometres.
///
/// Empty or single-point input returns 0.0.
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Bounding Box
// =============================================================================

/// Bounding box of a set of coordinates, or `None` for empty input.
///
/// ```rust
/// use waypath::{Coordinate, geo_utils};
///
/// let pts = vec![
///     Coordinate::new(37.50, 127.03),
///     Coordinate::new(37.56, 126.97),
/// ];
/// let bounds = geo_utils::compute_bounds(&pts).unwrap();
/// assert_eq!(bounds.min_lat, 37.50);
/// assert_eq!(bounds.max_lng, 127.03);
/// ```
pub fn compute_bounds(points: &[Coordinate]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lng = min_lng.min(p.longitude);
        max_lng = max_lng.max(p.longitude);
    }

    Some(Bounds { min_lat, max_lat, min_lng, max_lng })
}

// =============================================================================
// Unit Tests
// =============================================================================
