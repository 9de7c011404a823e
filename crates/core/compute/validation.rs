//! Validation for coordinates, query arguments, and stay dates.

use crate::error::{GeoStayError, Result};
use chrono::NaiveDate;
use geostay_types::geo::GeoPoint;

/// Wire format for stay dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates latitude and longitude for a query.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geostay::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(52.37, 4.89).is_ok());
/// assert!(validate_coordinates(95.0, 4.89).is_err());
/// assert!(validate_coordinates(52.37, 181.0).is_err());
/// assert!(validate_coordinates(f64::NAN, 0.0).is_err());
/// ```
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<()> {
    check_coordinates(lat, lon).map_err(GeoStayError::InvalidArgument)
}

/// Validates a point destined for the index.
///
/// Failures are reported as [`GeoStayError::InvalidInput`] since they describe
/// bad data rather than a bad query.
pub fn validate_point(point: &GeoPoint) -> Result<()> {
    if point.id().is_empty() {
        return Err(GeoStayError::InvalidInput(format!(
            "Point at ({}, {}) has an empty id",
            point.lat(),
            point.lon()
        )));
    }

    check_coordinates(point.lat(), point.lon())
        .map_err(|e| GeoStayError::InvalidInput(format!("Point {}: {}", point.id(), e)))
}

/// Validates multiple points.
///
/// # Examples
///
/// ```
/// use geostay::compute::validation::validate_points;
/// use geostay_types::geo::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new("a", 40.7, -74.0),
///     GeoPoint::new("b", 40.8, -73.9),
///     GeoPoint::new("c", 40.0, 999.0), // Invalid
/// ];
///
/// assert!(validate_points(&points).is_err());
/// ```
pub fn validate_points(points: &[GeoPoint]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_point(point).map_err(|e| {
            GeoStayError::InvalidInput(format!("Point at index {}: {}", idx, e))
        })?;
    }
    Ok(())
}

/// Validates the result count of a KNN query.
pub fn validate_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(GeoStayError::InvalidArgument(
            "k must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validates a search radius in kilometers.
///
/// # Examples
///
/// ```
/// use geostay::compute::validation::validate_radius_km;
///
/// assert!(validate_radius_km(10.0).is_ok());
/// assert!(validate_radius_km(0.0).is_err());
/// assert!(validate_radius_km(-1.0).is_err());
/// assert!(validate_radius_km(f64::INFINITY).is_err());
/// ```
pub fn validate_radius_km(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() {
        return Err(GeoStayError::InvalidArgument(format!(
            "Radius must be finite, got: {}",
            radius_km
        )));
    }
    if radius_km <= 0.0 {
        return Err(GeoStayError::InvalidArgument(format!(
            "Radius must be positive, got: {}",
            radius_km
        )));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` stay date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        GeoStayError::InvalidArgument(format!(
            "{} must be a YYYY-MM-DD date, got {:?}: {}",
            field, value, e
        ))
    })
}

/// Validates a stay: both dates well-formed and check-out not before check-in.
///
/// # Examples
///
/// ```
/// use geostay::compute::validation::validate_stay;
///
/// assert!(validate_stay("2015-04-09", "2015-04-10").is_ok());
/// assert!(validate_stay("2015-04-09", "2015-04-09").is_ok());
/// assert!(validate_stay("2015-04-10", "2015-04-09").is_err());
/// assert!(validate_stay("2015/04/09", "2015-04-10").is_err());
/// ```
pub fn validate_stay(in_date: &str, out_date: &str) -> Result<(NaiveDate, NaiveDate)> {
    let check_in = parse_date("inDate", in_date)?;
    let check_out = parse_date("outDate", out_date)?;

    if check_out < check_in {
        return Err(GeoStayError::InvalidArgument(format!(
            "outDate ({}) must not be before inDate ({})",
            out_date, in_date
        )));
    }

    Ok((check_in, check_out))
}

fn check_coordinates(lat: f64, lon: f64) -> std::result::Result<(), String> {
    if !lat.is_finite() {
        return Err(format!("Latitude must be finite, got: {}", lat));
    }

    if !lon.is_finite() {
        return Err(format!("Longitude must be finite, got: {}", lon));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude out of range [-90.0, 90.0]: {}", lat));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("Longitude out of range [-180.0, 180.0]: {}", lon));
    }

    Ok(())
}
