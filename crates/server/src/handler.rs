//! Handlers binding the RPC contracts to the core services.

use crate::protocol::{GeoRpc, SearchRpc};
use crate::upstream::{RemoteGeo, RemoteRate};
use geostay::{GeoStayError, NearbyService, SearchService};
use geostay_types::{Fault, FaultKind, IndexStats};
use std::sync::Arc;
use tarpc::context;
use tracing::{debug, warn};

/// Search service wired to remote geo and rate services.
pub type RemoteSearch = SearchService<RemoteGeo, RemoteRate>;

fn to_fault(op: &str, err: GeoStayError) -> Fault {
    let fault = Fault::from(err);
    match fault.kind {
        FaultKind::InvalidArgument => debug!("{} rejected: {}", op, fault.message),
        _ => warn!("{} failed: {}", op, fault),
    }
    fault
}

#[derive(Clone)]
pub struct GeoHandler {
    nearby: NearbyService,
}

impl GeoHandler {
    pub fn new(nearby: NearbyService) -> Self {
        Self { nearby }
    }
}

impl GeoRpc for GeoHandler {
    async fn nearby(
        self,
        _: context::Context,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<String>, Fault> {
        self.nearby.nearby(lat, lon).map_err(|e| to_fault("nearby", e))
    }

    async fn stats(self, _: context::Context) -> IndexStats {
        self.nearby.stats()
    }
}

#[derive(Clone)]
pub struct SearchHandler {
    search: Arc<RemoteSearch>,
}

impl SearchHandler {
    pub fn new(search: Arc<RemoteSearch>) -> Self {
        Self { search }
    }
}

impl SearchRpc for SearchHandler {
    async fn nearby(
        self,
        _: context::Context,
        lat: f64,
        lon: f64,
        in_date: String,
        out_date: String,
    ) -> Result<Vec<String>, Fault> {
        self.search
            .search(lat, lon, &in_date, &out_date)
            .await
            .map_err(|e| to_fault("search", e))
    }
}
