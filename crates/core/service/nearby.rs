//! Nearest hotel ids for a coordinate.

use super::lookup::GeoLookup;
use crate::compute::validation::validate_coordinates;
use crate::config::QueryConfig;
use crate::error::Result;
use crate::handle::IndexHandle;
use geostay_types::geo::GeoPoint;
use geostay_types::stats::IndexStats;
use std::sync::Arc;

/// Answers nearby queries from the current index snapshot.
///
/// Each call takes one snapshot, so a rebuild published mid-call does not
/// affect it.
///
/// # Examples
///
/// ```
/// use geostay::config::QueryConfig;
/// use geostay::service::NearbyService;
/// use geostay::IndexBuilder;
/// use geostay_types::geo::GeoPoint;
/// use std::sync::Arc;
///
/// let handle = IndexBuilder::new()
///     .point(GeoPoint::new("h1", 52.0, 4.9))
///     .point(GeoPoint::new("far", 40.0, -73.0))
///     .build_handle()
///     .unwrap();
///
/// let service = NearbyService::new(Arc::new(handle), QueryConfig::default());
/// assert_eq!(service.nearby(52.01, 4.9).unwrap(), vec!["h1"]);
/// ```
#[derive(Debug, Clone)]
pub struct NearbyService {
    index: Arc<IndexHandle>,
    query: QueryConfig,
}

impl NearbyService {
    pub fn new(index: Arc<IndexHandle>, query: QueryConfig) -> Self {
        Self { index, query }
    }

    /// Up to the configured `k` hotel ids within the configured radius,
    /// nearest first.
    pub fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<String>> {
        self.nearby_with(lat, lon, self.query.k, self.query.max_distance_km)
    }

    /// Same as [`NearbyService::nearby`] with an explicit count and radius.
    pub fn nearby_with(
        &self,
        lat: f64,
        lon: f64,
        k: usize,
        max_distance_km: f64,
    ) -> Result<Vec<String>> {
        validate_coordinates(lat, lon)?;

        let center = GeoPoint::anonymous(lat, lon);
        let snapshot = self.index.snapshot();
        let points = snapshot.k_nearest(&center, k, max_distance_km, |_| true)?;

        Ok(points.into_iter().map(GeoPoint::into_id).collect())
    }

    pub fn stats(&self) -> IndexStats {
        self.index.snapshot().stats().clone()
    }

    pub fn handle(&self) -> &Arc<IndexHandle> {
        &self.index
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query
    }
}

impl GeoLookup for NearbyService {
    async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<String>> {
        NearbyService::nearby(self, lat, lon)
    }
}
