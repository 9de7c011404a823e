use serde::{Deserialize, Serialize};

/// Spatial index statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of leaf partitions
    pub leaf_count: usize,
    /// Number of indexed points
    pub point_count: usize,
    /// Average points per leaf
    pub avg_points_per_leaf: f64,
    /// Largest number of points held by a single leaf
    pub max_points_per_leaf: usize,
    /// Deepest geohash precision used by any leaf
    pub max_precision_used: usize,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }
}
