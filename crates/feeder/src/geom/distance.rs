//! Distances on lon/lat coordinates (`x` = longitude, `y` = latitude, degrees).
//!
//! - `haversine_km`: great-circle measurement on a sphere of radius 6371 km.
//! - `offset_planar` / `planar_distance_km`: the equirectangular step used by the
//!   walker and its exact inverse. One degree of latitude is 111 km; longitude
//!   degrees shrink with the cosine of the latitude at the step's origin.
//!
//! The planar pair degrades near the poles: as `cos(lat) → 0` the longitude delta
//! of a step diverges. Callers that need true geodesics should not use it.

use geo::{Coord, LineString};

/// Mean Earth radius used by `haversine_km`.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree in the equirectangular approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance in km between two lon/lat points.
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlat = (b.y - a.y).to_radians();
    let dlon = (b.x - a.x).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Move `distance_km` from `from` along `bearing_deg` (clockwise from north).
#[inline]
pub fn offset_planar(from: Coord<f64>, distance_km: f64, bearing_deg: f64) -> Coord<f64> {
    let b = bearing_deg.to_radians();
    let dlat = (distance_km / KM_PER_DEGREE) * b.cos();
    let dlon = (distance_km / (KM_PER_DEGREE * from.y.to_radians().cos())) * b.sin();
    Coord {
        x: from.x + dlon,
        y: from.y + dlat,
    }
}

/// Inverse of `offset_planar`: km between `from` and `to`, scaling longitude by `cos(from.lat)`.
#[inline]
pub fn planar_distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let north = (to.y - from.y) * KM_PER_DEGREE;
    let east = (to.x - from.x) * KM_PER_DEGREE * from.y.to_radians().cos();
    north.hypot(east)
}

/// Sum of `planar_distance_km` over consecutive vertices.
pub fn planar_length_km(line: &LineString<f64>) -> f64 {
    line.0
        .windows(2)
        .map(|w| planar_distance_km(w[0], w[1]))
        .sum()
}

/// Sum of `haversine_km` over consecutive vertices.
pub fn haversine_length_km(line: &LineString<f64>) -> f64 {
    line.0.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}
