//! Nearby search with availability: spatial lookup, then pricing, then merge.

use super::lookup::{GeoLookup, RateLookup};
use crate::compute::validation::{validate_coordinates, validate_stay};
use crate::config::UpstreamConfig;
use crate::error::{GeoStayError, Result, Upstream};
use geostay_types::rate::RatePlan;
use rustc_hash::FxHashSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Lifecycle of a single search request.
///
/// ```text
/// Validated -> SpatialLookupPending -> SpatialLookupDone
///           -> PricingLookupPending -> PricingLookupDone -> Merged
/// ```
///
/// Only the two pending phases can exit to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Validated,
    SpatialLookupPending,
    SpatialLookupDone,
    PricingLookupPending,
    PricingLookupDone,
    Merged,
    Failed,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validated => "validated",
            Self::SpatialLookupPending => "spatial_lookup_pending",
            Self::SpatialLookupDone => "spatial_lookup_done",
            Self::PricingLookupPending => "pricing_lookup_pending",
            Self::PricingLookupDone => "pricing_lookup_done",
            Self::Merged => "merged",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Per-request phase tracker; every transition is logged at debug level.
struct Trace {
    phase: SearchPhase,
}

impl Trace {
    fn start() -> Self {
        log::debug!("search phase: {}", SearchPhase::Validated);
        Self {
            phase: SearchPhase::Validated,
        }
    }

    fn advance(&mut self, next: SearchPhase) {
        log::debug!("search phase: {} -> {}", self.phase, next);
        self.phase = next;
    }

    fn fail(&mut self, err: GeoStayError) -> GeoStayError {
        log::debug!("search phase: {} -> {} ({})", self.phase, SearchPhase::Failed, err);
        self.phase = SearchPhase::Failed;
        err
    }
}

/// Composes a geo lookup and a rate lookup into one ranked answer: the
/// nearest hotels that have a rate plan for the stay, nearest first.
///
/// No retries and no caching. Each lookup is bounded by its timeout from
/// [`UpstreamConfig`]; dropping the future returned by
/// [`SearchService::search`] cancels whichever lookup is in flight.
#[derive(Debug, Clone)]
pub struct SearchService<G, R> {
    geo: G,
    rate: R,
    upstream: UpstreamConfig,
}

impl<G: GeoLookup, R: RateLookup> SearchService<G, R> {
    pub fn new(geo: G, rate: R, upstream: UpstreamConfig) -> Self {
        Self {
            geo,
            rate,
            upstream,
        }
    }

    pub fn geo(&self) -> &G {
        &self.geo
    }

    pub fn rate(&self) -> &R {
        &self.rate
    }

    /// Hotel ids near `(lat, lon)` with a rate plan for `in_date..out_date`,
    /// in proximity order.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for out-of-range coordinates, dates that are not
    ///   `YYYY-MM-DD`, or `out_date` before `in_date`. Also when either
    ///   lookup rejects the arguments.
    /// - `UpstreamUnavailable` when a lookup fails or exceeds its timeout.
    ///   Errors from the geo lookup are passed through unchanged.
    pub async fn search(
        &self,
        lat: f64,
        lon: f64,
        in_date: &str,
        out_date: &str,
    ) -> Result<Vec<String>> {
        validate_coordinates(lat, lon)?;
        validate_stay(in_date, out_date)?;
        let mut trace = Trace::start();

        trace.advance(SearchPhase::SpatialLookupPending);
        let candidates = match bounded(
            Upstream::Geo,
            self.upstream.geo_timeout(),
            self.geo.nearby(lat, lon),
        )
        .await
        {
            Ok(ids) => ids,
            Err(e) => return Err(trace.fail(e)),
        };
        trace.advance(SearchPhase::SpatialLookupDone);

        trace.advance(SearchPhase::PricingLookupPending);
        let plans = match bounded(
            Upstream::Rate,
            self.upstream.rate_timeout(),
            self.rate.rates(candidates.clone(), in_date, out_date),
        )
        .await
        {
            Ok(plans) => plans,
            Err(e) => return Err(trace.fail(rate_error(e))),
        };
        trace.advance(SearchPhase::PricingLookupDone);

        let ids = merge_by_proximity(candidates, &plans);
        trace.advance(SearchPhase::Merged);
        log::debug!(
            "search({}, {}, {}..{}): {} priced of {} plans",
            lat,
            lon,
            in_date,
            out_date,
            ids.len(),
            plans.len()
        );

        Ok(ids)
    }
}

/// Run `call` with a deadline; elapsing it is an upstream failure.
async fn bounded<T, F>(service: Upstream, limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(GeoStayError::upstream(
            service,
            format!("no response within {}ms", limit.as_millis()),
        )),
    }
}

/// Pricing failures surface as `UpstreamUnavailable`, except argument
/// rejections which stay `InvalidArgument`.
fn rate_error(err: GeoStayError) -> GeoStayError {
    match err {
        GeoStayError::InvalidArgument(_) => err,
        GeoStayError::UpstreamUnavailable {
            service: Upstream::Rate,
            ..
        } => err,
        other => GeoStayError::upstream(Upstream::Rate, other.to_string()),
    }
}

/// Candidates, in their original order, that have at least one rate plan.
///
/// Plans for hotels that were not candidates are ignored, and a candidate
/// listed twice is kept once.
///
/// # Examples
///
/// ```
/// use geostay::service::merge_by_proximity;
/// use geostay_types::rate::RatePlan;
///
/// let candidates = vec!["H3", "H1", "H9", "H2"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let plans = vec![
///     RatePlan::new("H2", "2015-04-09", "2015-04-10"),
///     RatePlan::new("H1", "2015-04-09", "2015-04-10"),
/// ];
///
/// assert_eq!(merge_by_proximity(candidates, &plans), vec!["H1", "H2"]);
/// ```
pub fn merge_by_proximity(candidates: Vec<String>, plans: &[RatePlan]) -> Vec<String> {
    let priced: FxHashSet<&str> = plans.iter().map(|plan| plan.hotel_id.as_str()).collect();
    let mut kept: FxHashSet<String> = FxHashSet::default();

    candidates
        .into_iter()
        .filter(|id| priced.contains(id.as_str()) && kept.insert(id.clone()))
        .collect()
}
