//! tarpc transport for the geostay client

use geostay_server::{GeoRpcClient, SearchRpcClient};
use geostay_types::{Fault, FaultKind, IndexStats};
use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use tarpc::client;
use tarpc::context;
use tarpc::tokio_serde::formats::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),
    #[error("RPC error: {0}")]
    Rpc(#[from] tarpc::client::RpcError),
    #[error("Server error: {0}")]
    Server(Fault),
}

impl ClientError {
    /// Fault kind reported by the server, if the server answered.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            Self::Server(fault) => Some(fault.kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Default per-call deadline
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn call_context(timeout: Duration) -> context::Context {
    let mut ctx = context::current();
    ctx.deadline = SystemTime::now() + timeout;
    ctx
}

/// Client for the geo service.
#[derive(Clone)]
pub struct GeoClient {
    client: GeoRpcClient,
    timeout: Duration,
}

impl GeoClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let transport = tarpc::serde_transport::tcp::connect(addr, Json::default).await?;
        let client = GeoRpcClient::new(client::Config::default(), transport).spawn();
        Ok(Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Deadline applied to every subsequent call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Nearest hotel ids, closest first.
    pub async fn nearby(&self, lat: f64, lon: f64) -> Result<Vec<String>> {
        self.client
            .nearby(call_context(self.timeout), lat, lon)
            .await?
            .map_err(ClientError::Server)
    }

    pub async fn index_stats(&self) -> Result<IndexStats> {
        Ok(self.client.stats(call_context(self.timeout)).await?)
    }
}

/// Client for the search service.
#[derive(Clone)]
pub struct SearchClient {
    client: SearchRpcClient,
    timeout: Duration,
}

impl SearchClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let transport = tarpc::serde_transport::tcp::connect(addr, Json::default).await?;
        let client = SearchRpcClient::new(client::Config::default(), transport).spawn();
        Ok(Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Nearest hotels with rates between `in_date` and `out_date`
    /// (`YYYY-MM-DD`), closest first.
    pub async fn search(
        &self,
        lat: f64,
        lon: f64,
        in_date: &str,
        out_date: &str,
    ) -> Result<Vec<String>> {
        self.client
            .nearby(
                call_context(self.timeout),
                lat,
                lon,
                in_date.to_string(),
                out_date.to_string(),
            )
            .await?
            .map_err(ClientError::Server)
    }
}
