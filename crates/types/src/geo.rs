//! Identified geographic points.

use serde::{Deserialize, Serialize};

/// An identified location: opaque id plus latitude/longitude in degrees.
///
/// Points are immutable once constructed. The id is expected to be unique
/// within a dataset; query centers use an empty id.
///
/// # Examples
///
/// ```
/// use geostay_types::geo::GeoPoint;
///
/// let hotel = GeoPoint::new("h1", 37.7867, -122.4112);
/// assert_eq!(hotel.id(), "h1");
/// assert_eq!(hotel.lat(), 37.7867);
/// assert_eq!(hotel.lon(), -122.4112);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "hotelId")]
    id: String,
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a new point.
    #[inline]
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    /// Create an anonymous point (empty id), used as a query center.
    #[inline]
    pub fn anonymous(lat: f64, lon: f64) -> Self {
        Self::new(String::new(), lat, lon)
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Consume the point and return its id.
    #[inline]
    pub fn into_id(self) -> String {
        self.id
    }

    /// The point as a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Whether another point sits at exactly the same coordinates.
    #[inline]
    pub fn same_position(&self, other: &GeoPoint) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }

    /// Great-circle distance to another point in kilometers.
    ///
    /// Uses the haversine formula on a sphere with the mean Earth radius.
    ///
    /// # Examples
    ///
    /// ```
    /// use geostay_types::geo::GeoPoint;
    ///
    /// let nyc = GeoPoint::new("nyc", 40.7128, -74.0060);
    /// let la = GeoPoint::new("la", 34.0522, -118.2437);
    /// let km = nyc.haversine_distance_km(&la);
    /// assert!(km > 3_900.0); // ~3,944 km
    /// ```
    #[inline]
    pub fn haversine_distance_km(&self, other: &GeoPoint) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", self.id, self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let p = GeoPoint::new("h1", 52.0, 4.9);
        assert_eq!(p.id(), "h1");
        assert_eq!(p.lat(), 52.0);
        assert_eq!(p.lon(), 4.9);
        assert_eq!(p.to_point().x(), 4.9);
        assert_eq!(p.to_point().y(), 52.0);
    }

    #[test]
    fn test_anonymous_has_empty_id() {
        let p = GeoPoint::anonymous(1.0, 2.0);
        assert!(p.id().is_empty());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new("h1", 52.0, 4.9);
        assert_eq!(p.haversine_distance_km(&p), 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let a = GeoPoint::new("a", 0.0, 0.0);
        let b = GeoPoint::new("b", 1.0, 0.0);
        let km = a.haversine_distance_km(&b);
        assert!((km - 111.19).abs() < 0.1, "got {km}");
    }

    #[test]
    fn test_deserialize_hotel_id_alias() {
        let p: GeoPoint =
            serde_json::from_str(r#"{"hotelId": "7", "lat": 37.78, "lon": -122.41}"#).unwrap();
        assert_eq!(p.id(), "7");

        let p: GeoPoint = serde_json::from_str(r#"{"id": "8", "lat": 1.0, "lon": 2.0}"#).unwrap();
        assert_eq!(p.id(), "8");
    }

    #[test]
    fn test_same_position() {
        let a = GeoPoint::new("a", 1.0, 2.0);
        assert!(a.same_position(&GeoPoint::new("b", 1.0, 2.0)));
        assert!(!a.same_position(&GeoPoint::new("a", 1.0, 2.5)));
    }
}
