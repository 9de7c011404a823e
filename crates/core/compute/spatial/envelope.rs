//! Bounding boxes around spherical query circles.
//!
//! A circle of radius `r` on the sphere around `(lat, lon)` spans
//! `r / R` radians of latitude and `asin(sin(r / R) / cos(lat))` radians of
//! longitude, as long as it does not reach a pole. When it does, every
//! longitude is inside. When the longitude span crosses ±180°, the box is
//! split in two so each half stays inside the valid coordinate range.

use super::algorithms::earth_radius_km;
use geostay_types::geo::GeoPoint;
use rstar::AABB;
use std::f64::consts::{FRAC_PI_2, PI};

/// Padding in degrees added on every side to absorb floating point error.
const PADDING_DEGREES: f64 = 1e-7;

/// Envelopes (x = longitude, y = latitude) covering every point within
/// `radius_km` of `center`. Returns one envelope, or two when the circle
/// crosses the antimeridian.
pub fn query_envelopes(center: &GeoPoint, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let angular = radius_km / earth_radius_km();

    if angular >= PI {
        return vec![world()];
    }

    let lat = center.lat().to_radians();
    let min_lat = lat - angular;
    let max_lat = lat + angular;

    if max_lat >= FRAC_PI_2 || min_lat <= -FRAC_PI_2 {
        return vec![AABB::from_corners(
            [-180.0, clamp_lat(min_lat.to_degrees() - PADDING_DEGREES)],
            [180.0, clamp_lat(max_lat.to_degrees() + PADDING_DEGREES)],
        )];
    }

    let delta_lon = (angular.sin() / lat.cos()).clamp(-1.0, 1.0).asin().to_degrees();
    let min_y = min_lat.to_degrees() - PADDING_DEGREES;
    let max_y = max_lat.to_degrees() + PADDING_DEGREES;
    let min_x = center.lon() - delta_lon - PADDING_DEGREES;
    let max_x = center.lon() + delta_lon + PADDING_DEGREES;

    if max_x - min_x >= 360.0 {
        return vec![AABB::from_corners([-180.0, min_y], [180.0, max_y])];
    }

    if min_x < -180.0 {
        vec![
            AABB::from_corners([min_x + 360.0, min_y], [180.0, max_y]),
            AABB::from_corners([-180.0, min_y], [max_x, max_y]),
        ]
    } else if max_x > 180.0 {
        vec![
            AABB::from_corners([min_x, min_y], [180.0, max_y]),
            AABB::from_corners([-180.0, min_y], [max_x - 360.0, max_y]),
        ]
    } else {
        vec![AABB::from_corners([min_x, min_y], [max_x, max_y])]
    }
}

fn world() -> AABB<[f64; 2]> {
    AABB::from_corners([-180.0, -90.0], [180.0, 90.0])
}

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}
