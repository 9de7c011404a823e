//! Request-level services built on the spatial index.
//!
//! - [`NearbyService`]: nearest hotel ids for a coordinate.
//! - [`SearchService`]: nearest hotels that have rates for a stay, composed
//!   from a [`GeoLookup`] and a [`RateLookup`].

pub mod lookup;
pub mod nearby;
pub mod search;

pub use lookup::{GeoLookup, RateLookup};
pub use nearby::NearbyService;
pub use search::{SearchPhase, SearchService, merge_by_proximity};
