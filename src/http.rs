//! Blocking HTTP client for the Tmap geocoding and routing APIs.
//!
//! One request per call: no retries, no pooling beyond what reqwest does on
//! its own. Every request is bounded by [`TmapConfig::timeout`]; a timeout
//! comes back as [`Error::Transport`].

use std::time::Instant;

use log::{debug, info, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::geocode::{parse_poi_search, parse_reverse_geocode};
use crate::{
    Coordinate, Error, Geocoder, Result, RouteProvider, RouteRequest, RouteResponse, TmapConfig,
};

const POI_SEARCH_PATH: &str = "/tmap/pois?version=1";
const REVERSE_GEOCODE_PATH: &str = "/tmap/geo/reversegeocoding?version=1";

/// Tmap API client. Build one per process and share it by reference.
pub struct TmapClient {
    client: Client,
    config: TmapConfig,
}

impl TmapClient {
    pub fn new(config: TmapConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TmapConfig {
        &self.config
    }

    fn poi_search(&self, address: &str) -> RequestBuilder {
        self.client
            .get(self.config.endpoint(POI_SEARCH_PATH))
            .query(&[("appKey", self.config.app_key.as_str()), ("searchKeyword", address)])
    }

    fn reverse_lookup(&self, point: Coordinate) -> RequestBuilder {
        self.client
            .get(self.config.endpoint(REVERSE_GEOCODE_PATH))
            .query(&[("appKey", self.config.app_key.as_str())])
            .query(&[("lat", point.latitude), ("lon", point.longitude)])
    }

    fn route(&self, request: &RouteRequest) -> RequestBuilder {
        self.client
            .post(self.config.endpoint(request.mode.endpoint_path()))
            .header("appKey", &self.config.app_key)
            .form(&request.form_fields())
    }

    /// Send and read the body; any non-2xx status becomes [`Error::Status`].
    /// A `204 No Content` is a success with an empty body, which the
    /// payload parsers report as `NotFound`.
    fn execute(&self, label: &str, request: RequestBuilder) -> Result<String> {
        let started = Instant::now();
        let response: Response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        debug!(
            "[Tmap {}] HTTP {} in {:?} ({} bytes)",
            label,
            status.as_u16(),
            started.elapsed(),
            body.len()
        );

        if !status.is_success() {
            warn!("[Tmap {}] HTTP {}: {}", label, status.as_u16(), body);
            return Err(Error::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }
}

impl Geocoder for TmapClient {
    fn geocode(&self, address: &str) -> Result<Coordinate> {
        let body = self.execute("geocode", self.poi_search(address))?;
        let coordinate = parse_poi_search(&body, address)?;
        info!("Geocoded {:?} -> ({}, {})", address, coordinate.latitude, coordinate.longitude);
        Ok(coordinate)
    }

    fn reverse_geocode(&self, point: Coordinate) -> Result<String> {
        let point = point.validated()?;
        let body = self.execute("reverse", self.reverse_lookup(point))?;
        parse_reverse_geocode(&body, point)
    }
}

impl RouteProvider for TmapClient {
    fn request_route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        let body = self.execute("route", self.route(request))?;
        RouteResponse::from_json(&body)
    }
}
