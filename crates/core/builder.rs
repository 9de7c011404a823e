//! Builder for spatial indexes.
//!
//! Collects points from code or dataset files, then builds either a bare
//! [`SpatialIndex`] or an [`IndexHandle`] ready to be shared by services.

use crate::compute::spatial::SpatialIndex;
use crate::config::IndexConfig;
use crate::dataset::load_points;
use crate::error::Result;
use crate::handle::IndexHandle;
use geostay_types::geo::GeoPoint;
use std::path::Path;

/// Accumulates points and partitioning parameters for an index build.
///
/// # Examples
///
/// ```
/// use geostay::IndexBuilder;
/// use geostay_types::geo::GeoPoint;
///
/// let index = IndexBuilder::new()
///     .point(GeoPoint::new("h1", 52.0, 4.9))
///     .point(GeoPoint::new("h2", 52.1, 4.8))
///     .build()
///     .unwrap();
///
/// assert_eq!(index.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
    points: Vec<GeoPoint>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partitioning parameters.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn point(mut self, point: GeoPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn points<I: IntoIterator<Item = GeoPoint>>(mut self, points: I) -> Self {
        self.points.extend(points);
        self
    }

    /// Add every point of a JSON dataset file.
    pub fn load_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let points = load_points(path)?;
        Ok(self.points(points))
    }

    pub fn build(self) -> Result<SpatialIndex> {
        SpatialIndex::build(self.points, &self.config)
    }

    /// Build and wrap the index in a handle for snapshot/rebuild sharing.
    pub fn build_handle(self) -> Result<IndexHandle> {
        Ok(IndexHandle::new(self.build()?))
    }
}
