//! Nearest-hotel search: an adaptive geohash + R-tree index for k-nearest
//! queries, and a search service that combines it with a pricing lookup.
//!
//! ## Features
//! - **Spatial index**: immutable, bulk-loaded, exact haversine KNN with a
//!   hard result count and radius. Deterministic ordering (distance, then id).
//! - **Snapshot rebuilds**: [`IndexHandle`] publishes a freshly built index
//!   with a pointer swap; in-flight queries finish on their snapshot.
//! - **Search orchestration**: [`SearchService`] looks up nearby hotels, asks
//!   a pricing service which of them have rates, and keeps proximity order.
//!
//! ```rust
//! use geostay::prelude::*;
//! use std::sync::Arc;
//!
//! let handle = IndexBuilder::new()
//!     .point(GeoPoint::new("H1", 52.0, 4.9))
//!     .point(GeoPoint::new("H2", 52.1, 4.8))
//!     .point(GeoPoint::new("H3", 40.0, -73.0))
//!     .build_handle()?;
//!
//! let nearby = NearbyService::new(Arc::new(handle), QueryConfig::default().with_k(2));
//! let ids = nearby.nearby(52.05, 4.85)?;
//! assert_eq!(ids.len(), 2);
//! assert!(!ids.contains(&"H3".to_string()));
//! # Ok::<(), geostay::GeoStayError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod handle;
pub mod service;

pub use builder::IndexBuilder;
pub use compute::spatial::SpatialIndex;
pub use config::{Config, IndexConfig, QueryConfig, UpstreamConfig};
pub use error::{GeoStayError, Result, Upstream};
pub use handle::IndexHandle;
pub use service::{GeoLookup, NearbyService, RateLookup, SearchPhase, SearchService};

pub use geostay_types::{Fault, FaultKind, GeoPoint, IndexStats, RatePlan, RoomType};

pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{GeoStayError, IndexBuilder, IndexHandle, Result, SpatialIndex};

    pub use crate::{Config, IndexConfig, QueryConfig, UpstreamConfig};

    pub use crate::{GeoLookup, NearbyService, RateLookup, SearchService};

    pub use crate::{GeoPoint, RatePlan};

    pub use crate::validation;
}
