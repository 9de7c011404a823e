//! Capabilities a search depends on.
//!
//! Both are usually remote services, but any implementation works: the geo
//! lookup can be an in-process [`NearbyService`](super::NearbyService), and
//! tests substitute stubs.

use crate::error::Result;
use geostay_types::rate::RatePlan;
use std::future::Future;
use std::sync::Arc;

/// Nearest hotel ids for a coordinate, closest first.
pub trait GeoLookup: Send + Sync {
    fn nearby(&self, lat: f64, lon: f64) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Rate plans for the given hotels and stay dates.
///
/// Only hotels with a valid plan for the stay are expected in the response;
/// the order of the returned plans carries no meaning.
pub trait RateLookup: Send + Sync {
    fn rates(
        &self,
        hotel_ids: Vec<String>,
        in_date: &str,
        out_date: &str,
    ) -> impl Future<Output = Result<Vec<RatePlan>>> + Send;
}

impl<T: GeoLookup> GeoLookup for Arc<T> {
    fn nearby(&self, lat: f64, lon: f64) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).nearby(lat, lon)
    }
}

impl<T: RateLookup> RateLookup for Arc<T> {
    fn rates(
        &self,
        hotel_ids: Vec<String>,
        in_date: &str,
        out_date: &str,
    ) -> impl Future<Output = Result<Vec<RatePlan>>> + Send {
        (**self).rates(hotel_ids, in_date, out_date)
    }
}
