//! Forward and reverse geocoding.
//!
//! [`Geocoder`] is the seam the rest of the crate depends on; the Tmap
//! implementation lives on [`TmapClient`](crate::TmapClient). The response
//! parsers here are transport-agnostic so they can be exercised without a
//! network.

use serde::{Deserialize, Deserializer};

use crate::{Coordinate, Error, Result};

pub trait Geocoder {
    /// Resolve a free-text address or keyword to the coordinate of the first
    /// match. Fails with `NotFound` when the service has no match.
    fn geocode(&self, address: &str) -> Result<Coordinate>;

    /// Resolve a coordinate to the full formatted address of the first match.
    fn reverse_geocode(&self, point: Coordinate) -> Result<String>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Coordinate> {
        (**self).geocode(address)
    }

    fn reverse_geocode(&self, point: Coordinate) -> Result<String> {
        (**self).reverse_geocode(point)
    }
}

// --- Tmap POI search (`/tmap/pois`) ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoiSearchResponse {
    search_poi_info: SearchPoiInfo,
}

#[derive(Debug, Deserialize)]
struct SearchPoiInfo {
    pois: Pois,
}

#[derive(Debug, Deserialize)]
struct Pois {
    #[serde(default)]
    poi: Vec<Poi>,
}

/// Tmap sends these as strings; numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Poi {
    #[serde(deserialize_with = "lenient_f64")]
    noor_lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    noor_lon: f64,
}

// --- Tmap reverse geocoding (`/tmap/geo/reversegeocoding`) ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    address_info: AddressInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressInfo {
    #[serde(default)]
    full_address: String,
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Parse a POI search body into the first match's coordinate.
///
/// An empty body (Tmap answers `204 No Content` when nothing matches) or an
/// empty `poi` list is `NotFound`; anything else malformed is a service error.
pub fn parse_poi_search(body: &str, query: &str) -> Result<Coordinate> {
    if body.trim().is_empty() {
        return Err(Error::not_found(query));
    }

    let response: PoiSearchResponse = serde_json::from_str(body)?;
    let poi = response
        .search_poi_info
        .pois
        .poi
        .first()
        .ok_or_else(|| Error::not_found(query))?;

    Coordinate::try_new(poi.noor_lat, poi.noor_lon).map_err(|_| {
        Error::MalformedResponse(format!(
            "POI coordinate out of range: lat={}, lon={}",
            poi.noor_lat, poi.noor_lon
        ))
    })
}

/// Parse a reverse geocoding body into the formatted address.
pub fn parse_reverse_geocode(body: &str, point: Coordinate) -> Result<String> {
    let query = || format!("{},{}", point.latitude, point.longitude);

    if body.trim().is_empty() {
        return Err(Error::not_found(query()));
    }

    let response: ReverseGeocodeResponse = serde_json::from_str(body)?;
    let address = response.address_info.full_address.trim();
    if address.is_empty() {
        return Err(Error::not_found(query()));
    }
    Ok(address.to_string())
}
