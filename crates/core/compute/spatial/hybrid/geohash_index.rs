//! Build side of the hybrid index: deduplication, adaptive geohash
//! partitioning and bulk loading of the leaf R-tree.

use super::leaf::Leaf;
use crate::compute::validation::validate_point;
use crate::config::IndexConfig;
use crate::error::{GeoStayError, Result};
use geostay_types::geo::GeoPoint;
use geostay_types::stats::IndexStats;
use rstar::RTree;
use rustc_hash::FxHashMap;
use std::ops::Range;

/// Immutable nearest-neighbor index over a set of identified points.
///
/// # Layout
///
/// ```text
/// SpatialIndex
/// ├─ leaves: RTree<Leaf>           (bulk loaded, one entry per geohash cell)
/// │  ├─ "u173z"  -> [h1, h7, h9]
/// │  ├─ "u1760"  -> [h2]
/// │  └─ "u176b"  -> [h3, h4]
/// ├─ config: IndexConfig           (precision bounds, leaf capacity)
/// └─ stats:  IndexStats
/// ```
///
/// Every point lives in exactly one leaf. Cells start at
/// `base_precision` characters and are split one character at a time while
/// they hold more than `leaf_capacity` points, up to `max_precision`. Dense
/// areas end up with small cells and sparse areas with large ones.
///
/// The index is never mutated after [`SpatialIndex::build`]; share it behind
/// an `Arc` and rebuild to change the point set.
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
///         GeoPoint::new("dam", 52.3731, 4.8926),
///         GeoPoint::new("centraal", 52.3791, 4.9003),
///     ],
///     &IndexConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(index.len(), 2);
/// ```
#[derive(Debug)]
pub struct SpatialIndex {
    pub(crate) leaves: RTree<Leaf>,
    point_count: usize,
    config: IndexConfig,
    stats: IndexStats,
}

impl SpatialIndex {
    /// Build an index from `points`.
    ///
    /// Fails with [`GeoStayError::InvalidInput`] when a point has an empty id
    /// or out-of-range coordinates, when two points share an id but not a
    /// position, or when `config` is invalid. Repeats of the same point are
    /// collapsed. An empty input builds an empty index.
    pub fn build<I>(points: I, config: &IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        config
            .validate()
            .map_err(|e| GeoStayError::InvalidInput(format!("Invalid index config: {}", e)))?;

        let points = dedupe(points)?;
        let point_count = points.len();

        let mut keyed = Vec::with_capacity(points.len());
        for point in points {
            let coord = geohash::Coord {
                x: point.lon(),
                y: point.lat(),
            };
            let hash = geohash::encode(coord, config.max_precision).map_err(|e| {
                GeoStayError::InvalidInput(format!("Point {}: {}", point.id(), e))
            })?;
            keyed.push((hash, point));
        }

        // Sorting by hash makes every cell a contiguous run at any precision
        keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id().cmp(b.1.id())));

        let mut cells = Vec::new();
        partition(&keyed, 0, config.base_precision, config, &mut cells);

        let mut points = keyed.into_iter().map(|(_, point)| point);
        let mut leaves = Vec::with_capacity(cells.len());
        for (prefix, range) in cells {
            let members: Vec<GeoPoint> = points.by_ref().take(range.len()).collect();
            leaves.push(Leaf::new(prefix, members)?);
        }

        let stats = collect_stats(&leaves, point_count);
        log::debug!(
            "Built spatial index: {} points in {} leaves (max {} per leaf, deepest precision {})",
            stats.point_count,
            stats.leaf_count,
            stats.max_points_per_leaf,
            stats.max_precision_used
        );

        Ok(Self {
            leaves: RTree::bulk_load(leaves),
            point_count,
            config: *config,
            stats,
        })
    }

    /// Number of distinct points in the index.
    pub fn len(&self) -> usize {
        self.point_count
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Iterate over all leaves in no particular order.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.leaves.iter()
    }

    /// Iterate over all points in no particular order.
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint> {
        self.leaves.iter().flat_map(|leaf| leaf.points().iter())
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self {
            leaves: RTree::new(),
            point_count: 0,
            config: IndexConfig::default(),
            stats: IndexStats::default(),
        }
    }
}

/// Validate points and drop exact repeats, keeping first-seen order.
fn dedupe<I>(points: I) -> Result<Vec<GeoPoint>>
where
    I: IntoIterator<Item = GeoPoint>,
{
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut unique = Vec::new();
    let mut repeats = 0usize;

    for (idx, point) in points.into_iter().enumerate() {
        validate_point(&point)
            .map_err(|e| GeoStayError::InvalidInput(format!("Point at index {}: {}", idx, e)))?;

        match seen.get(point.id()) {
            Some(&existing) => {
                let first: &GeoPoint = &unique[existing];
                if !first.same_position(&point) {
                    return Err(GeoStayError::InvalidInput(format!(
                        "Duplicate id {} with different coordinates: {} and {}",
                        point.id(),
                        first,
                        point
                    )));
                }
                repeats += 1;
            }
            None => {
                seen.insert(point.id().to_string(), unique.len());
                unique.push(point);
            }
        }
    }

    if repeats > 0 {
        log::warn!("Collapsed {} repeated points while building index", repeats);
    }

    Ok(unique)
}

/// Split the sorted run `keyed` into cells, appending `(prefix, range)` pairs
/// in order. Ranges are absolute positions, offset by `offset`.
fn partition(
    keyed: &[(String, GeoPoint)],
    offset: usize,
    precision: usize,
    config: &IndexConfig,
    out: &mut Vec<(String, Range<usize>)>,
) {
    let mut start = 0;
    while start < keyed.len() {
        let prefix = &keyed[start].0[..precision];
        let end = start
            + keyed[start..]
                .iter()
                .take_while(|(hash, _)| hash.starts_with(prefix))
                .count();

        if end - start > config.leaf_capacity && precision < config.max_precision {
            partition(&keyed[start..end], offset + start, precision + 1, config, out);
        } else {
            out.push((prefix.to_string(), offset + start..offset + end));
        }

        start = end;
    }
}

fn collect_stats(leaves: &[Leaf], point_count: usize) -> IndexStats {
    if leaves.is_empty() {
        return IndexStats::default();
    }

    IndexStats {
        leaf_count: leaves.len(),
        point_count,
        avg_points_per_leaf: point_count as f64 / leaves.len() as f64,
        max_points_per_leaf: leaves.iter().map(Leaf::len).max().unwrap_or(0),
        max_precision_used: leaves.iter().map(Leaf::precision).max().unwrap_or(0),
    }
}
