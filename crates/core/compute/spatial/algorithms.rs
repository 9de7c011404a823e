//! Distance computations and bounded top-k selection.

use geo::HaversineMeasure;
use geostay_types::geo::GeoPoint;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Mean Earth radius in kilometers, matching the radius `geo::Haversine` uses.
pub fn earth_radius_km() -> f64 {
    HaversineMeasure::GRS80_MEAN_RADIUS.radius() / 1000.0
}

/// Great-circle distance between two points in kilometers.
#[inline]
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    a.haversine_distance_km(b)
}

/// Total order used to rank neighbors: distance ascending, then id ascending.
#[inline]
pub fn compare_neighbors(a: (&GeoPoint, f64), b: (&GeoPoint, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.id().cmp(b.0.id()))
}

/// Heap entry for KNN selection (max-heap, so the worst candidate is on top)
struct KnnEntry<'a> {
    point: &'a GeoPoint,
    distance: f64,
}

impl PartialEq for KnnEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KnnEntry<'_> {}

impl PartialOrd for KnnEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KnnEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_neighbors((self.point, self.distance), (other.point, other.distance))
    }
}

/// Keeps the `k` best `(point, distance)` pairs seen so far.
///
/// Complexity: O(n log k) over n offers, cloning only the survivors at the end.
pub struct TopK<'a> {
    k: usize,
    heap: BinaryHeap<KnnEntry<'a>>,
}

impl<'a> TopK<'a> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.min(1024)),
        }
    }

    pub fn offer(&mut self, point: &'a GeoPoint, distance: f64) {
        if self.k == 0 || !distance.is_finite() {
            return;
        }

        let entry = KnnEntry { point, distance };
        if self.heap.len() < self.k {
            self.heap.push(entry);
        } else if let Some(worst) = self.heap.peek()
            && entry < *worst
        {
            self.heap.pop();
            self.heap.push(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Survivors ordered by distance ascending, ties by id ascending.
    pub fn into_sorted_vec(self) -> Vec<(GeoPoint, f64)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|entry| (entry.point.clone(), entry.distance))
            .collect()
    }
}

/// K nearest neighbors by linear scan. Returns (point, distance_km) sorted by
/// distance, then id.
///
/// Visits every point, so it is only suitable for small slices; the spatial
/// index answers the same question without touching distant points.
///
/// # Examples
///
/// ```
/// use geostay::compute::spatial::knn_linear;
/// use geostay_types::geo::GeoPoint;
///
/// let center = GeoPoint::anonymous(40.7, -74.0);
/// let points = vec![
///     GeoPoint::new("nyc", 40.8, -74.1),
///     GeoPoint::new("brooklyn", 40.6, -73.9),
///     GeoPoint::new("far", 41.0, -75.0),
/// ];
///
/// let nearest = knn_linear(&center, &points, 2, 50.0);
/// assert_eq!(nearest.len(), 2);
/// ```
pub fn knn_linear(
    center: &GeoPoint,
    points: &[GeoPoint],
    k: usize,
    max_distance_km: f64,
) -> Vec<(GeoPoint, f64)> {
    let mut top = TopK::new(k);
    for point in points {
        let distance = haversine_km(center, point);
        if distance <= max_distance_km {
            top.offer(point, distance);
        }
    }
    top.into_sorted_vec()
}
