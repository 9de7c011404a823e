//! RPC contracts of the geo, rate and search services.
//!
//! Every fallible call returns a [`Fault`] carrying the error kind, so a
//! caller can tell a rejected argument from an unavailable dependency.

use geostay_types::{Fault, IndexStats, RatePlan};

/// Nearest hotels for a coordinate, served from the spatial index.
#[tarpc::service]
pub trait GeoRpc {
    /// Up to the configured number of hotel ids, nearest first.
    async fn nearby(lat: f64, lon: f64) -> Result<Vec<String>, Fault>;

    /// Shape of the index currently serving.
    async fn stats() -> IndexStats;
}

/// Pricing contract. Consumed by the search service; implemented elsewhere.
#[tarpc::service]
pub trait RateRpc {
    /// Rate plans for the hotels with availability between the dates
    /// (`YYYY-MM-DD`).
    async fn get_rates(
        hotel_ids: Vec<String>,
        in_date: String,
        out_date: String,
    ) -> Result<Vec<RatePlan>, Fault>;
}

/// Nearest hotels with rates for a stay.
#[tarpc::service]
pub trait SearchRpc {
    async fn nearby(
        lat: f64,
        lon: f64,
        in_date: String,
        out_date: String,
    ) -> Result<Vec<String>, Fault>;
}
