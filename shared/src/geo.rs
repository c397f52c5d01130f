//! Great-circle distance and nearest-point search

use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres in one nautical mile
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Haversine distance between two coordinates in kilometres.
///
/// The haversine term is clamped to `[0, 1]` so rounding near identical or
/// antipodal points cannot feed a negative value into the square roots.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lon = (b.lon - a.lon).abs().to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let sin_half_lat = (d_lat / 2.0).sin();
    let sin_half_lon = (d_lon / 2.0).sin();

    let h = (sin_half_lat * sin_half_lat
        + lat1.cos() * lat2.cos() * sin_half_lon * sin_half_lon)
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NAUTICAL_MILE
}

/// Closest candidate to an origin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nearest {
    pub name: String,
    pub distance_km: f64,
}

/// Linear scan for the closest named coordinate.
///
/// Ties keep the first candidate in input order. Returns `None` for an
/// empty candidate list.
pub fn nearest_to<'a, I>(origin: Coordinate, candidates: I) -> Option<Nearest>
where
    I: IntoIterator<Item = (&'a str, Coordinate)>,
{
    let mut best: Option<(&str, f64)> = None;
    for (name, coordinate) in candidates {
        let distance = distance_km(origin, coordinate);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((name, distance)),
        }
    }

    best.map(|(name, distance_km)| Nearest {
        name: name.to_string(),
        distance_km,
    })
}
