//! Loading the initial point dataset.
//!
//! A dataset is a JSON array of objects with an id and coordinates:
//!
//! ```json
//! [
//!   {"hotelId": "1", "lat": 37.7867, "lon": -122.4112},
//!   {"id": "2", "lat": 37.7854, "lon": -122.4005}
//! ]
//! ```
//!
//! Either `id` or `hotelId` names the identifier. Coordinates are checked
//! when the index is built, not here.

use crate::error::Result;
use geostay_types::geo::GeoPoint;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a dataset from a JSON string.
pub fn parse_points(json: &str) -> Result<Vec<GeoPoint>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a dataset from a JSON file.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<GeoPoint>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let points: Vec<GeoPoint> = serde_json::from_reader(reader)?;
    log::debug!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}
