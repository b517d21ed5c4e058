//! Spherical-earth helpers used by the correlator.

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine great-circle distance in meters between two points given in
/// degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let lat2_rad = lat2.to_radians();
    let lon2_rad = lon2.to_radians();

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let half_dlat = (dlat / 2.0).sin();
    let half_dlon = (dlon / 2.0).sin();
    let a = half_dlat * half_dlat
        + lat1_rad.cos() * lat2_rad.cos() * half_dlon * half_dlon;

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// True when a coordinate lies outside the latitude/longitude ranges.
/// NaN compares false, so it is not flagged here; it simply never matches.
pub fn is_invalid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.abs() > 90.0 || longitude.abs() > 180.0
}
