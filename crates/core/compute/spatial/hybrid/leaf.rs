//! Leaf buckets of the hybrid index.

use crate::error::{GeoStayError, Result};
use geostay_types::geo::GeoPoint;
use rstar::{AABB, RTreeObject};

/// A geohash cell together with the points it holds.
///
/// The R-tree envelope is the tight bounding box of the points rather than
/// the cell itself, so a cell with a single point near one corner is only
/// visited by queries that reach that corner.
#[derive(Debug, Clone)]
pub struct Leaf {
    geohash: String,
    cell: geo::Rect<f64>,
    min: [f64; 2],
    max: [f64; 2],
    points: Vec<GeoPoint>,
}

impl Leaf {
    /// Create a leaf for the cell `geohash`. `points` must not be empty.
    pub fn new(geohash: String, points: Vec<GeoPoint>) -> Result<Self> {
        let cell = geohash::decode_bbox(&geohash).map_err(|e| {
            GeoStayError::Internal(format!("Invalid geohash cell {:?}: {}", geohash, e))
        })?;

        let Some(first) = points.first() else {
            return Err(GeoStayError::Internal(format!(
                "Leaf {} has no points",
                geohash
            )));
        };

        let mut min = [first.lon(), first.lat()];
        let mut max = min;
        for point in &points[1..] {
            min[0] = min[0].min(point.lon());
            min[1] = min[1].min(point.lat());
            max[0] = max[0].max(point.lon());
            max[1] = max[1].max(point.lat());
        }

        Ok(Self {
            geohash,
            cell,
            min,
            max,
            points,
        })
    }

    /// Geohash prefix identifying the cell.
    pub fn geohash(&self) -> &str {
        &self.geohash
    }

    /// Geohash precision of the cell.
    pub fn precision(&self) -> usize {
        self.geohash.len()
    }

    /// Bounds of the geohash cell.
    pub fn cell(&self) -> geo::Rect<f64> {
        self.cell
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl RTreeObject for Leaf {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}
