pub mod algorithms;
pub use algorithms::{TopK, compare_neighbors, earth_radius_km, haversine_km, knn_linear};

pub mod envelope;
pub use envelope::query_envelopes;

pub mod hybrid;
pub use hybrid::{Leaf, QueryStats, SpatialIndex};
