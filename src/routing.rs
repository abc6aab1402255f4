//! Route requests against an external routing service.

use crate::{encode_waypoints, Coordinate, Result, RouteResponse};

/// Which Tmap routing product to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
}

impl TravelMode {
    /// Endpoint path, relative to the API host.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            TravelMode::Walking => "/tmap/routes/pedestrian?version=1",
            TravelMode::Driving => "/tmap/routes?version=1",
        }
    }
}

/// Everything the routing service needs for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub mode: TravelMode,
    pub start: Coordinate,
    pub start_name: String,
    pub end: Coordinate,
    pub end_name: String,
    /// Must-pass intermediate stops, in order.
    pub waypoints: Vec<Coordinate>,
}

impl RouteRequest {
    pub fn new(
        mode: TravelMode,
        start: Coordinate,
        start_name: impl Into<String>,
        end: Coordinate,
        end_name: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            start,
            start_name: start_name.into(),
            end,
            end_name: end_name.into(),
            waypoints: Vec::new(),
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Coordinate>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Form body for the POST. `X` is longitude and `Y` latitude;
    /// `passList` is only sent when there are waypoints.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("startName", self.start_name.clone()),
            ("startX", self.start.longitude.to_string()),
            ("startY", self.start.latitude.to_string()),
            ("endName", self.end_name.clone()),
            ("endX", self.end.longitude.to_string()),
            ("endY", self.end.latitude.to_string()),
            ("reqCoordType", "WGS84GEO".to_string()),
            ("resCoordType", "WGS84GEO".to_string()),
        ];
        if !self.waypoints.is_empty() {
            fields.push(("passList", encode_waypoints(&self.waypoints)));
        }
        fields
    }
}

/// A routing backend. Implementations perform exactly one request and
/// return the parsed response, or the failure, without retrying.
pub trait RouteProvider {
    fn request_route(&self, request: &RouteRequest) -> Result<RouteResponse>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for &P {
    fn request_route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        (**self).request_route(request)
    }
}
