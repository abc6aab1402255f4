//! Nearest visited points to a query location.
//!
//! Distances are haversine kilometres from the query to every admitted
//! sample. They are computed per query and returned alongside the samples;
//! the shared [`LocationHistory`] is never written to, so concurrent queries
//! over one table are safe.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::{Coordinate, Geocoder, HistorySample, LocationHistory, Result};

/// The queried location, labelled with its address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub coordinate: Coordinate,
    pub address: String,
}

/// A history sample with its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub sample: HistorySample,
    pub distance_km: f64,
}

/// Centre plus the nearest samples ("markers"), closest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborResult {
    pub center: Center,
    pub markers: Vec<Neighbor>,
}

/// Answers nearest-visit queries over one history table.
pub struct NearestNeighborFinder<'a, G> {
    history: &'a LocationHistory,
    geocoder: G,
}

impl<'a, G: Geocoder> NearestNeighborFinder<'a, G> {
    pub fn new(history: &'a LocationHistory, geocoder: G) -> Self {
        Self { history, geocoder }
    }

    /// The `k` samples closest to `query`, with `query` reverse-geocoded as
    /// the centre.
    pub fn nearest(&self, query: Coordinate, k: usize) -> Result<NeighborResult> {
        let query = query.validated()?;
        let address = self.geocoder.reverse_geocode(query)?;
        Ok(self.result_for(query, address, k))
    }

    /// Geocode `address`, then find the `k` samples closest to it. The given
    /// address text labels the centre.
    pub fn nearest_to_address(&self, address: &str, k: usize) -> Result<NeighborResult> {
        let query = self.geocoder.geocode(address)?;
        Ok(self.result_for(query, address.to_string(), k))
    }

    fn result_for(&self, query: Coordinate, address: String, k: usize) -> NeighborResult {
        let markers = k_nearest(self.history, query, k);
        debug!(
            "{} nearest of {} samples to {:?}",
            markers.len(),
            self.history.len(),
            address
        );
        NeighborResult {
            center: Center { coordinate: query, address },
            markers,
        }
    }
}

/// The `k` samples nearest to `query`, ascending by distance.
///
/// Ties keep table order, i.e. the earlier visit wins. Returns at most
/// `min(k, history.len())` entries.
pub fn k_nearest(history: &LocationHistory, query: Coordinate, k: usize) -> Vec<Neighbor> {
    if k == 0 || history.is_empty() {
        return Vec::new();
    }

    let mut neighbors = distances(history.samples(), query);

    // Stable sort, so equal distances stay in timestamp order
    neighbors.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    neighbors.truncate(k);
    neighbors
}

#[cfg(not(feature = "parallel"))]
fn distances(samples: &[HistorySample], query: Coordinate) -> Vec<Neighbor> {
    samples
        .iter()
        .map(|&sample| Neighbor {
            sample,
            distance_km: haversine_distance(&query, &sample.coordinate),
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn distances(samples: &[HistorySample], query: Coordinate) -> Vec<Neighbor> {
    use rayon::prelude::*;

    // Indexed collect preserves input order
    samples
        .par_iter()
        .map(|&sample| Neighbor {
            sample,
            distance_km: haversine_distance(&query, &sample.coordinate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    struct FixedGeocoder;

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, address: &str) -> Result<Coordinate> {
            match address {
                "강남역" => Ok(Coordinate::new(37.498, 127.027)),
                _ => Err(Error::NotFound { query: address.to_string() }),
            }
        }

        fn reverse_geocode(&self, _point: Coordinate) -> Result<String> {
            Ok("서울특별시 강남구 역삼동".to_string())
        }
    }

    fn seoul_history() -> LocationHistory {
        LocationHistory::from_samples(vec![
            HistorySample::new(1_000, Coordinate::new(37.50, 127.03), 10),
            HistorySample::new(2_000, Coordinate::new(37.56, 126.97), 10),
            HistorySample::new(3_000, Coordinate::new(37.45, 127.10), 10),
        ])
    }

    #[test]
    fn test_three_sample_scenario() {
        // (37.45, 127.10) is ~8.37 km away and (37.56, 126.97) ~8.54 km
        let history = seoul_history();
        let finder = NearestNeighborFinder::new(&history, FixedGeocoder);
        let result = finder.nearest(Coordinate::new(37.498, 127.027), 2).unwrap();

        assert_eq!(result.markers.len(), 2);
        assert_eq!(result.markers[0].sample.coordinate, Coordinate::new(37.50, 127.03));
        assert_eq!(result.markers[1].sample.coordinate, Coordinate::new(37.45, 127.10));
        assert!(result.markers[0].distance_km < 0.5);
        assert!((result.markers[1].distance_km - 8.37).abs() < 0.05);
        assert_eq!(result.center.address, "서울특별시 강남구 역삼동");
        assert_eq!(result.center.coordinate, Coordinate::new(37.498, 127.027));
    }

    #[test]
    fn test_five_sample_scenario_on_equator() {
        // One degree of longitude on the equator is ~111.23 km
        let history = LocationHistory::from_samples(vec![
            HistorySample::new(5, Coordinate::new(0.0, 4.0), 10),
            HistorySample::new(1, Coordinate::new(0.0, 3.0), 10),
            HistorySample::new(2, Coordinate::new(0.0, -1.0), 10),
            HistorySample::new(3, Coordinate::new(0.0, 0.5), 10),
            HistorySample::new(4, Coordinate::new(0.0, 10.0), 10),
        ]);
        let markers = k_nearest(&history, Coordinate::new(0.0, 0.0), 3);

        let lons: Vec<f64> = markers.iter().map(|n| n.sample.coordinate.longitude).collect();
        assert_eq!(lons, vec![0.5, -1.0, 3.0]);
        assert!((markers[0].distance_km - 55.615).abs() < 0.01);
        assert!((markers[1].distance_km - 111.230).abs() < 0.01);
        assert!((markers[2].distance_km - 333.689).abs() < 0.01);
    }

    #[test]
    fn test_ties_prefer_earlier_visits() {
        let history = LocationHistory::from_samples(vec![
            HistorySample::new(30, Coordinate::new(0.0, -1.0), 10),
            HistorySample::new(10, Coordinate::new(0.0, 1.0), 10),
            HistorySample::new(20, Coordinate::new(0.0, 2.0), 10),
        ]);
        let markers = k_nearest(&history, Coordinate::new(0.0, 0.0), 2);

        // (0,1) and (0,-1) are exactly equidistant
        assert_eq!(markers[0].distance_km, markers[1].distance_km);
        assert_eq!(markers[0].sample.timestamp_ms, 10);
        assert_eq!(markers[1].sample.timestamp_ms, 30);
    }

    #[test]
    fn test_result_bounded_and_sorted() {
        let history = seoul_history();
        for k in 0..6 {
            let markers = k_nearest(&history, Coordinate::new(37.5, 127.0), k);
            assert!(markers.len() <= k);
            assert!(markers.len() <= history.len());
            assert!(markers.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        }
    }

    #[test]
    fn test_empty_history() {
        let history = LocationHistory::default();
        let finder = NearestNeighborFinder::new(&history, FixedGeocoder);
        let result = finder.nearest(Coordinate::new(37.5, 127.0), 3).unwrap();
        assert!(result.markers.is_empty());
    }

    #[test]
    fn test_shared_table_untouched() {
        let history = seoul_history();
        let before = history.clone();
        let _ = k_nearest(&history, Coordinate::new(37.5, 127.0), 2);
        let _ = k_nearest(&history, Coordinate::new(35.1, 129.0), 3);
        assert_eq!(history, before);
    }

    #[test]
    fn test_nearest_to_address() {
        let history = seoul_history();
        let finder = NearestNeighborFinder::new(&history, FixedGeocoder);

        let result = finder.nearest_to_address("강남역", 1).unwrap();
        assert_eq!(result.center.address, "강남역");
        assert_eq!(result.markers[0].sample.timestamp_ms, 1_000);

        let err = finder.nearest_to_address("없는역", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_query() {
        let history = seoul_history();
        let finder = NearestNeighborFinder::new(&history, FixedGeocoder);
        let err = finder.nearest(Coordinate::new(95.0, 127.0), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
