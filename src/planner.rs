//! End-to-end route planning: geocode, request, extract.
//!
//! ```text
//! addresses ──geocode──▶ coordinates ──RouteRequest──▶ RouteProvider
//!                                                         │
//!                                   Path ◀──extract_path──┘
//! ```

use log::{debug, info};

use crate::route::RouteSummary;
use crate::{
    extract_path, Coordinate, ExtractConfig, Geocoder, Path, Result, RouteProvider, RouteRequest,
    TravelMode,
};

/// A route ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// The request that was sent, with resolved coordinates and names.
    pub request: RouteRequest,
    pub path: Path,
    pub summary: Option<RouteSummary>,
}

/// Ties a geocoder and a routing backend together.
///
/// Construct one per session and pass it where routes are needed; the
/// planner holds no state between calls.
pub struct RoutePlanner<G, P> {
    geocoder: G,
    router: P,
    extract: ExtractConfig,
}

impl<G: Geocoder, P: RouteProvider> RoutePlanner<G, P> {
    pub fn new(geocoder: G, router: P) -> Self {
        Self {
            geocoder,
            router,
            extract: ExtractConfig::default(),
        }
    }

    pub fn with_extract_config(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    /// Route between two addresses, passing through `waypoint_addresses` in order.
    ///
    /// Every address is geocoded first; the addresses themselves are sent as
    /// the start/end names.
    pub fn route_by_address(
        &self,
        mode: TravelMode,
        start_address: &str,
        end_address: &str,
        waypoint_addresses: &[&str],
    ) -> Result<PlannedRoute> {
        let start = self.geocoder.geocode(start_address)?;
        let end = self.geocoder.geocode(end_address)?;
        let waypoints = waypoint_addresses
            .iter()
            .map(|address| self.geocoder.geocode(address))
            .collect::<Result<Vec<_>>>()?;

        let request = RouteRequest::new(mode, start, start_address, end, end_address)
            .with_waypoints(waypoints);
        self.plan(request)
    }

    /// Route between two coordinates. Start and end names are filled in by
    /// reverse geocoding.
    pub fn route_by_coordinates(
        &self,
        mode: TravelMode,
        start: Coordinate,
        end: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<PlannedRoute> {
        let start = start.validated()?;
        let end = end.validated()?;
        for waypoint in waypoints {
            waypoint.validated()?;
        }

        let start_name = self.geocoder.reverse_geocode(start)?;
        let end_name = self.geocoder.reverse_geocode(end)?;

        let request = RouteRequest::new(mode, start, start_name, end, end_name)
            .with_waypoints(waypoints.to_vec());
        self.plan(request)
    }

    /// Send a fully specified request and extract its path.
    pub fn plan(&self, request: RouteRequest) -> Result<PlannedRoute> {
        debug!(
            "Requesting {:?} route {} -> {} via {} waypoints",
            request.mode,
            request.start_name,
            request.end_name,
            request.waypoints.len()
        );

        let response = self.router.request_route(&request)?;
        let path = extract_path(&response.features, &self.extract);
        let summary = response.summary();

        info!(
            "Route {} -> {}: {} features, {} path points",
            request.start_name,
            request.end_name,
            response.features.len(),
            path.len()
        );

        Ok(PlannedRoute { request, path, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{FeatureProperties, Geometry, RouteFeature};
    use crate::{Error, ErrorKind, RouteResponse, ARRIVAL_MARKER};
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeGeocoder {
        places: HashMap<&'static str, Coordinate>,
    }

    impl FakeGeocoder {
        fn seoul() -> Self {
            let mut places = HashMap::new();
            places.insert("강남역", Coordinate::new(37.4979, 127.0276));
            places.insert("역삼역", Coordinate::new(37.5006, 127.0364));
            places.insert("선릉역", Coordinate::new(37.5045, 127.0490));
            Self { places }
        }
    }

    impl Geocoder for FakeGeocoder {
        fn geocode(&self, address: &str) -> Result<Coordinate> {
            self.places
                .get(address)
                .copied()
                .ok_or_else(|| Error::NotFound { query: address.to_string() })
        }

        fn reverse_geocode(&self, point: Coordinate) -> Result<String> {
            self.places
                .iter()
                .find(|(_, c)| **c == point)
                .map(|(name, _)| name.to_string())
                .ok_or_else(|| Error::NotFound { query: format!("{:?}", point) })
        }
    }

    /// Draws a straight line from start through waypoints to end.
    #[derive(Default)]
    struct FakeRouter {
        requests: RefCell<Vec<RouteRequest>>,
    }

    impl RouteProvider for FakeRouter {
        fn request_route(&self, request: &RouteRequest) -> Result<RouteResponse> {
            self.requests.borrow_mut().push(request.clone());

            let mut stops = vec![request.start];
            stops.extend(request.waypoints.iter().copied());
            stops.push(request.end);

            let line = RouteFeature {
                geometry: Geometry::LineString {
                    coordinates: stops.iter().map(|c| c.to_wire()).collect(),
                },
                properties: FeatureProperties {
                    total_distance: Some(1200.0),
                    total_time: Some(900.0),
                    ..Default::default()
                },
            };
            let arrival = RouteFeature {
                geometry: Geometry::Point { coordinates: request.end.to_wire() },
                properties: FeatureProperties {
                    description: Some(ARRIVAL_MARKER.to_string()),
                    ..Default::default()
                },
            };
            Ok(RouteResponse { features: vec![line, arrival] })
        }
    }

    struct FailingRouter;

    impl RouteProvider for FailingRouter {
        fn request_route(&self, _: &RouteRequest) -> Result<RouteResponse> {
            Err(Error::Status { status: 502, body: "bad gateway".to_string() })
        }
    }

    #[test]
    fn test_route_by_address_with_waypoint() {
        let router = FakeRouter::default();
        let planner = RoutePlanner::new(FakeGeocoder::seoul(), &router);

        let route = planner
            .route_by_address(TravelMode::Walking, "강남역", "선릉역", &["역삼역"])
            .unwrap();

        assert_eq!(
            route.path.points(),
            &[
                Coordinate::new(37.4979, 127.0276),
                Coordinate::new(37.5006, 127.0364),
                Coordinate::new(37.5045, 127.0490),
            ]
        );
        assert_eq!(route.request.start_name, "강남역");
        assert_eq!(route.summary.unwrap().distance_m, 1200.0);

        let sent = router.requests.borrow();
        assert_eq!(sent.len(), 1);
        let fields = sent[0].form_fields();
        assert!(fields.contains(&("passList", "127.0364,37.5006".to_string())));
    }

    #[test]
    fn test_route_by_address_unknown_address() {
        let router = FakeRouter::default();
        let planner = RoutePlanner::new(FakeGeocoder::seoul(), &router);

        let err = planner
            .route_by_address(TravelMode::Walking, "강남역", "없는역", &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(router.requests.borrow().is_empty(), "no route request after a failed lookup");
    }

    #[test]
    fn test_route_by_coordinates_names_from_reverse_geocoding() {
        let router = FakeRouter::default();
        let planner = RoutePlanner::new(FakeGeocoder::seoul(), &router);

        let route = planner
            .route_by_coordinates(
                TravelMode::Driving,
                Coordinate::new(37.4979, 127.0276),
                Coordinate::new(37.5045, 127.0490),
                &[],
            )
            .unwrap();

        assert_eq!(route.request.start_name, "강남역");
        assert_eq!(route.request.end_name, "선릉역");
        assert_eq!(route.request.mode, TravelMode::Driving);
        assert_eq!(route.path.len(), 2);
    }

    #[test]
    fn test_route_by_coordinates_rejects_invalid_input() {
        let router = FakeRouter::default();
        let planner = RoutePlanner::new(FakeGeocoder::seoul(), &router);

        let err = planner
            .route_by_coordinates(
                TravelMode::Walking,
                Coordinate::new(37.4979, 127.0276),
                Coordinate::new(37.5045, 200.0),
                &[],
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(router.requests.borrow().is_empty());
    }

    #[test]
    fn test_router_failure_propagates() {
        let planner = RoutePlanner::new(FakeGeocoder::seoul(), FailingRouter);
        let err = planner
            .route_by_address(TravelMode::Walking, "강남역", "역삼역", &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
    }
}
