//! # geostay-types
//!
//! Data and wire types shared by the geostay services.
//!
//! - **Locations**: [`GeoPoint`], an identified latitude/longitude pair
//! - **Pricing contract**: [`RatePlan`] and [`RoomType`], as returned by the rate service
//! - **Faults**: [`Fault`] and [`FaultKind`], the structured error carried over RPC
//! - **Statistics**: [`IndexStats`] describing a built spatial index
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use geostay_types::geo::GeoPoint;
//!
//! let amsterdam = GeoPoint::new("ams", 52.3676, 4.9041);
//! let rotterdam = GeoPoint::new("rtm", 51.9244, 4.4777);
//! let km = amsterdam.haversine_distance_km(&rotterdam);
//! assert!(km > 55.0 && km < 60.0);
//! ```

pub mod fault;
pub mod geo;
pub mod rate;
pub mod stats;

pub use fault::{Fault, FaultKind};
pub use geo::GeoPoint;
pub use rate::{RatePlan, RoomType};
pub use stats::IndexStats;
