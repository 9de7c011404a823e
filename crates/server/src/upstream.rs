//! Remote implementations of the lookups a search depends on.
//!
//! Each call carries a tarpc deadline equal to the configured timeout, so the
//! remote side abandons work the caller has stopped waiting for. Transport
//! failures become `UpstreamUnavailable`; faults returned by the remote side
//! keep their kind.

use crate::protocol::{GeoRpcClient, RateRpcClient};
use geostay::{GeoLookup, GeoStayError, RateLookup, Result, Upstream};
use geostay_types::RatePlan;
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tarpc::client::{self, RpcError};
use tarpc::context;
use tarpc::tokio_serde::formats::Json;
use tracing::info;

fn deadline_context(timeout: Duration) -> context::Context {
    let mut ctx = context::current();
    ctx.deadline = SystemTime::now() + timeout;
    ctx
}

fn transport_error(service: Upstream, err: RpcError) -> GeoStayError {
    GeoStayError::upstream(service, err.to_string())
}

/// Geo service reached over RPC.
#[derive(Clone)]
pub struct RemoteGeo {
    client: GeoRpcClient,
    timeout: Duration,
}

impl RemoteGeo {
    pub async fn connect(addr: SocketAddr, timeout: Duration) -> std::io::Result<Self> {
        let transport = tarpc::serde_transport::tcp::connect(addr, Json::default).await?;
        let client = GeoRpcClient::new(client::Config::default(), transport).spawn();
        info!("Connected to geo service at {}", addr);
        Ok(Self { client, timeout })
    }
}

impl GeoLookup for RemoteGeo {
    async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<String>> {
        self.client
            .nearby(deadline_context(self.timeout), lat, lon)
            .await
            .map_err(|e| transport_error(Upstream::Geo, e))?
            .map_err(|fault| GeoStayError::from_fault(Upstream::Geo, fault))
    }
}

/// Rate service reached over RPC.
#[derive(Clone)]
pub struct RemoteRate {
    client: RateRpcClient,
    timeout: Duration,
}

impl RemoteRate {
    pub async fn connect(addr: SocketAddr, timeout: Duration) -> std::io::Result<Self> {
        let transport = tarpc::serde_transport::tcp::connect(addr, Json::default).await?;
        let client = RateRpcClient::new(client::Config::default(), transport).spawn();
        info!("Connected to rate service at {}", addr);
        Ok(Self { client, timeout })
    }
}

impl RateLookup for RemoteRate {
    async fn rates(
        &self,
        hotel_ids: Vec<String>,
        in_date: &str,
        out_date: &str,
    ) -> Result<Vec<RatePlan>> {
        self.client
            .get_rates(
                deadline_context(self.timeout),
                hotel_ids,
                in_date.to_string(),
                out_date.to_string(),
            )
            .await
            .map_err(|e| transport_error(Upstream::Rate, e))?
            .map_err(|fault| GeoStayError::from_fault(Upstream::Rate, fault))
    }
}
