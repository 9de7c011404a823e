//! # Adaptive Geohash + R-tree Index
//!
//! Nearest-neighbor index over a fixed set of identified points.
//!
//! ## Layout
//!
//! Points are bucketed into geohash cells. Each cell starts at the configured
//! base precision and is split into its 32 children while it holds more than
//! `leaf_capacity` points, until `max_precision` is reached. The resulting
//! leaves are bulk loaded into a single R*-tree keyed by the bounding box of
//! their points.
//!
//! ```text
//! precision 4          precision 5 (split)
//! ┌────────────┐       ┌──┬──┬──┬──┐
//! │ u173       │  ->   │z │y │  │  │   only dense cells are split
//! │ 300 points │       ├──┼──┼──┼──┤
//! └────────────┘       │  │w │  │  │
//!                      └──┴──┴──┴──┘
//! ```
//!
//! ## Query Flow
//!
//! ```text
//! 1. Validate center, k and radius
//! 2. Compute the lon/lat envelope(s) of the search circle
//!    (two when it crosses the antimeridian, a polar cap near the poles)
//! 3. Ask the R-tree for leaves intersecting the envelope(s)
//! 4. Compute the haversine distance of each point in those leaves
//! 5. Keep the k best within the radius, ordered by (distance, id)
//! ```
//!
//! The envelope always contains the full circle, so step 3 never drops a
//! qualifying point and results match a linear scan exactly.
//!
//! ## Precision Guidelines
//!
//! | Precision | Cell size (approx) |
//! |-----------|--------------------|
//! | 4         | ~39km × 20km       |
//! | 5         | ~4.9km × 4.9km     |
//! | 6         | ~1.2km × 0.6km     |
//! | 7         | ~153m × 153m       |
//! | 9         | ~4.8m × 4.8m       |

pub mod geohash_index;
pub mod leaf;
pub mod query;

pub use geohash_index::SpatialIndex;
pub use leaf::Leaf;
pub use query::QueryStats;
