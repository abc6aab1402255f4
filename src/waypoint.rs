//! Waypoint (`passList`) encoding for route requests.

use log::warn;

use crate::Coordinate;

/// Joins longitude and latitude inside one waypoint.
pub const COORDINATE_SEPARATOR: &str = ",";

/// Joins consecutive waypoints.
pub const WAYPOINT_SEPARATOR: &str = "_";

/// Most pass-through points the Tmap pedestrian API accepts. Not enforced
/// here; longer lists are sent as-is and the service decides.
pub const MAX_PASS_POINTS: usize = 5;

/// Encode waypoints as `lon,lat_lon,lat_...`, in the given order.
///
/// ```
/// use waypath::{encode_waypoints, Coordinate};
///
/// let stops = [Coordinate::new(37.5, 127.0), Coordinate::new(37.6, 127.1)];
/// assert_eq!(encode_waypoints(&stops), "127,37.5_127.1,37.6");
/// assert_eq!(encode_waypoints(&[]), "");
/// ```
pub fn encode_waypoints(waypoints: &[Coordinate]) -> String {
    if waypoints.len() > MAX_PASS_POINTS {
        warn!(
            "{} waypoints exceeds the service limit of {}; the request may be rejected",
            waypoints.len(),
            MAX_PASS_POINTS
        );
    }

    waypoints
        .iter()
        .map(|c| {
            let [lon, lat] = c.to_wire();
            format!("{}{}{}", lon, COORDINATE_SEPARATOR, lat)
        })
        .collect::<Vec<_>>()
        .join(WAYPOINT_SEPARATOR)
}
