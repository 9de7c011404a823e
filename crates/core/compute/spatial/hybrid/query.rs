//! K-nearest-neighbor queries over the hybrid index.

use super::geohash_index::SpatialIndex;
use super::leaf::Leaf;
use crate::compute::spatial::algorithms::{TopK, haversine_km};
use crate::compute::spatial::envelope::query_envelopes;
use crate::compute::validation::{validate_coordinates, validate_k, validate_radius_km};
use crate::error::Result;
use geostay_types::geo::GeoPoint;
use rustc_hash::FxHashSet;

/// Counters for a single query, reported at debug level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Leaves whose envelope intersected the search area
    pub leaves_examined: usize,
    /// Points whose distance was computed
    pub candidates_examined: usize,
    /// Points returned
    pub results_returned: usize,
}

impl SpatialIndex {
    /// Up to `k` points within `max_distance_km` of `center` that satisfy
    /// `include`, nearest first.
    ///
    /// Distances are haversine great-circle distances. Points at equal
    /// distance are ordered by id, so the result is fully deterministic for a
    /// given point set. Searches work across the antimeridian and over the
    /// poles.
    ///
    /// # Errors
    ///
    /// [`GeoStayError::InvalidArgument`](crate::error::GeoStayError::InvalidArgument)
    /// if the center is out of range, `k` is zero, or the radius is not a
    /// positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use geostay::compute::spatial::SpatialIndex;
    /// use geostay::config::IndexConfig;
    /// use geostay_types::geo::GeoPoint;
    ///
    /// let index = SpatialIndex::build(
    ///     vec![
    ///         GeoPoint::new("near", 52.3731, 4.8926),
    ///         GeoPoint::new("nearer", 52.3700, 4.8900),
    ///         GeoPoint::new("far", 51.9225, 4.4792),
    ///     ],
    ///     &IndexConfig::default(),
    /// )
    /// .unwrap();
    ///
    /// let center = GeoPoint::anonymous(52.37, 4.89);
    /// let hits = index.k_nearest(&center, 5, 10.0, |_| true).unwrap();
    /// let ids: Vec<&str> = hits.iter().map(|p| p.id()).collect();
    /// assert_eq!(ids, vec!["nearer", "near"]);
    /// ```
    pub fn k_nearest<F>(
        &self,
        center: &GeoPoint,
        k: usize,
        max_distance_km: f64,
        include: F,
    ) -> Result<Vec<GeoPoint>>
    where
        F: Fn(&GeoPoint) -> bool,
    {
        Ok(self
            .k_nearest_with_distance(center, k, max_distance_km, include)?
            .into_iter()
            .map(|(point, _)| point)
            .collect())
    }

    /// Like [`SpatialIndex::k_nearest`], also returning each distance in
    /// kilometers.
    pub fn k_nearest_with_distance<F>(
        &self,
        center: &GeoPoint,
        k: usize,
        max_distance_km: f64,
        include: F,
    ) -> Result<Vec<(GeoPoint, f64)>>
    where
        F: Fn(&GeoPoint) -> bool,
    {
        validate_coordinates(center.lat(), center.lon())?;
        validate_k(k)?;
        validate_radius_km(max_distance_km)?;

        let mut stats = QueryStats::default();
        let mut top = TopK::new(k);

        for leaf in self.candidate_leaves(center, max_distance_km) {
            stats.leaves_examined += 1;
            for point in leaf.points() {
                stats.candidates_examined += 1;
                let distance = haversine_km(center, point);
                if distance <= max_distance_km && include(point) {
                    top.offer(point, distance);
                }
            }
        }

        let results = top.into_sorted_vec();
        stats.results_returned = results.len();
        log::debug!(
            "k_nearest({}, k={}, radius={}km): {:?}",
            center,
            k,
            max_distance_km,
            stats
        );

        Ok(results)
    }

    /// Leaves that may hold a point within `radius_km` of `center`, each
    /// reported once even when the search area is split at the antimeridian.
    fn candidate_leaves(&self, center: &GeoPoint, radius_km: f64) -> Vec<&Leaf> {
        let envelopes = query_envelopes(center, radius_km);
        if envelopes.len() == 1 {
            return self
                .leaves
                .locate_in_envelope_intersecting(&envelopes[0])
                .collect();
        }

        let mut seen = FxHashSet::default();
        let mut leaves = Vec::new();
        for envelope in &envelopes {
            for leaf in self.leaves.locate_in_envelope_intersecting(envelope) {
                if seen.insert(leaf.geohash()) {
                    leaves.push(leaf);
                }
            }
        }
        leaves
    }
}
